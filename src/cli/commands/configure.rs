//! Configure command handler for storing the app token.

use anyhow::{Context, Result, bail};
use inquire::{Password, PasswordDisplayMode};

use crate::cli::session::Session;
use crate::config::ResolveOptions;
use crate::credentials::CredentialStore;
use crate::push::APP_TOKEN_KEY;
use crate::ui::{Spinner, Style, handle_prompt_cancellation};

pub struct ConfigureOptions {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub temporary: bool,
    pub show: bool,
}

/// Stores the app token and checks that Juremy can be reached with it.
///
/// The token is stored before the connection test, so a failed test can be
/// retried without entering it again.
pub async fn run_configure(options: ConfigureOptions) -> Result<()> {
    let session = Session::open(&ResolveOptions {
        base_url: options.base_url.clone(),
    })?;

    if options.show {
        print_configuration(&session);
        return Ok(());
    }

    let token = match options.token {
        Some(token) => token,
        None => match handle_prompt_cancellation(prompt_token)? {
            Some(token) => token,
            None => return Ok(()),
        },
    };
    let token = token.trim();
    if token.is_empty() {
        bail!("App token cannot be empty");
    }

    session
        .credentials
        .set(APP_TOKEN_KEY, token, options.temporary)?;

    let client = session.client()?;
    let spinner = Spinner::new("Connecting to Juremy...");
    let result = client.test_connection_and_setup().await;
    drop(spinner);
    result.context("Connection test failed")?;

    println!("{} Connected to Juremy", Style::success("✓"));
    if options.temporary {
        println!(
            "{}",
            Style::hint("The token was not saved and is only used for this run.")
        );
    } else {
        println!(
            "  Token saved to {}",
            Style::secondary(session.credentials.manager().config_path().display())
        );
    }

    Ok(())
}

fn prompt_token() -> Result<String> {
    let token = Password::new("Juremy app token:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_help_message("Copy it from the app push settings in Juremy")
        .prompt()?;
    Ok(token)
}

fn print_configuration(session: &Session) {
    let credentials = &session.credentials;

    println!("{}", Style::header("Current configuration"));
    println!(
        "  {}     {}",
        Style::label("config"),
        Style::secondary(credentials.manager().config_path().display())
    );
    println!(
        "  {}   {}",
        Style::label("base_url"),
        Style::value(&session.config.base_url)
    );

    let token = credentials
        .get(APP_TOKEN_KEY)
        .filter(|token| !token.trim().is_empty());
    let token_line = match token {
        Some(token) if credentials.is_stored_temporarily(APP_TOKEN_KEY) => format!(
            "{} {}",
            Style::value(mask_token(&token)),
            Style::secondary(format!("(from ${})", session.config.app_token_env))
        ),
        Some(token) => Style::value(mask_token(&token)),
        None => Style::secondary("(not set)"),
    };
    println!("  {}      {}", Style::label("token"), token_line);
    println!(
        "  {}    {}",
        Style::label("retries"),
        Style::value(session.config.backoff.max_retries)
    );
}

/// Shows only the first few characters of a token.
fn mask_token(token: &str) -> String {
    let token = token.trim();
    let visible: String = token.chars().take(4).collect();
    if visible.len() == token.len() {
        "****".to_string()
    } else {
        format!("{visible}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token_hides_rest() {
        assert_eq!(mask_token("abcdef123456"), "abcd…");
        assert_eq!(mask_token("  abcdef  "), "abcd…");
    }

    #[test]
    fn test_mask_token_short_is_fully_hidden() {
        assert_eq!(mask_token("abc"), "****");
        assert_eq!(mask_token("abcd"), "****");
    }
}
