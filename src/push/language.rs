//! Language code mapping for Juremy searches.
//!
//! Juremy indexes the 24 official EU languages and addresses them by their
//! ISO 639-2 (three-letter) codes.

use super::error::PushError;

/// Supported language codes: (ISO 639-1, ISO 639-2, name).
pub const SUPPORTED_LANGUAGES: &[(&str, &str, &str)] = &[
    ("HU", "hun", "Hungarian"),
    ("EN", "eng", "English"),
    ("DE", "deu", "German"),
    ("FR", "fra", "French"),
    ("ES", "spa", "Spanish"),
    ("IT", "ita", "Italian"),
    ("NL", "nld", "Dutch"),
    ("PL", "pol", "Polish"),
    ("PT", "por", "Portuguese"),
    ("RO", "ron", "Romanian"),
    ("SK", "slk", "Slovak"),
    ("SL", "slv", "Slovenian"),
    ("FI", "fin", "Finnish"),
    ("SV", "swe", "Swedish"),
    ("CS", "ces", "Czech"),
    ("DA", "dan", "Danish"),
    ("ET", "est", "Estonian"),
    ("LV", "lav", "Latvian"),
    ("LT", "lit", "Lithuanian"),
    ("MT", "mlt", "Maltese"),
    ("BG", "bul", "Bulgarian"),
    ("HR", "hrv", "Croatian"),
    ("EL", "ell", "Greek"),
    ("GA", "gle", "Irish"),
];

/// Converts a two-letter language code (case-insensitive) to the three-letter
/// code Juremy expects.
///
/// # Errors
///
/// Returns [`PushError::LanguageNotSupported`] naming `code` as given when it
/// has no mapping.
pub fn to_three_letter(code: &str) -> Result<&'static str, PushError> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(two, _, _)| two.eq_ignore_ascii_case(code))
        .map(|(_, three, _)| *three)
        .ok_or_else(|| PushError::LanguageNotSupported(code.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_to_three_letter_valid() {
        assert_eq!(to_three_letter("EN").unwrap(), "eng");
        assert_eq!(to_three_letter("HU").unwrap(), "hun");
        assert_eq!(to_three_letter("GA").unwrap(), "gle");
    }

    #[test]
    fn test_to_three_letter_is_case_insensitive() {
        assert_eq!(to_three_letter("de").unwrap(), "deu");
        assert_eq!(to_three_letter("El").unwrap(), "ell");
    }

    #[test]
    fn test_to_three_letter_invalid() {
        let err = to_three_letter("XX").unwrap_err();
        assert!(matches!(err, PushError::LanguageNotSupported(ref code) if code == "XX"));
        assert!(to_three_letter("").is_err());
        assert!(to_three_letter("eng").is_err());
    }

    #[test]
    fn test_table_covers_eu_languages() {
        assert_eq!(SUPPORTED_LANGUAGES.len(), 24);
    }
}
