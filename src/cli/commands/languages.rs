use crate::push::SUPPORTED_LANGUAGES;
use crate::ui::Style;

/// Prints all supported language codes to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Supported language codes"));
    for (code, three_letter, name) in SUPPORTED_LANGUAGES {
        println!(
            "  {:3} {:4} {}",
            Style::code(code),
            Style::secondary(three_letter),
            name
        );
    }
}
