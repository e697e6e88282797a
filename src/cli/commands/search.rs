use anyhow::{Result, bail};

use crate::cli::session::Session;
use crate::config::ResolveOptions;
use crate::input::{InputReader, InputSource};
use crate::push::{MAX_TEXT_LENGTH, PushOutcome};
use crate::ui::{Spinner, Style};

pub struct SearchOptions {
    pub base_url: Option<String>,
    pub from: String,
    pub to: String,
    pub text: Option<String>,
    pub file: Option<String>,
}

pub async fn run_search(options: SearchOptions) -> Result<()> {
    let text = InputReader::read(&InputSource::from_args(options.text, options.file))?;
    if text.trim().is_empty() {
        bail!("Input is empty");
    }

    let session = Session::open(&ResolveOptions {
        base_url: options.base_url,
    })?;
    let client = session.client()?;

    let spinner = Spinner::new("Pushing search to Juremy...");
    let outcome = client.translate(&options.from, &options.to, &text).await;
    drop(spinner);

    match outcome? {
        PushOutcome::Delivered => {
            println!("{} Search pushed to Juremy", Style::success("✓"));
        }
        PushOutcome::Superseded => {
            println!("{}", Style::warning("Search superseded by a newer one"));
        }
    }

    if text.chars().count() > MAX_TEXT_LENGTH {
        eprintln!(
            "{}",
            Style::warning(format!(
                "Text was truncated to its first {MAX_TEXT_LENGTH} characters"
            ))
        );
    }

    Ok(())
}
