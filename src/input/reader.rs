use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, Read};

const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB

/// Where the search text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Text(String),
    File(String),
    Stdin,
}

impl InputSource {
    /// Picks the source from CLI arguments: inline text wins over a file,
    /// and stdin is used when neither is given.
    pub fn from_args(text: Option<String>, file: Option<String>) -> Self {
        match (text, file) {
            (Some(text), _) => Self::Text(text),
            (None, Some(path)) => Self::File(path),
            (None, None) => Self::Stdin,
        }
    }
}

pub struct InputReader;

impl InputReader {
    /// Reads the search text, stripping a single trailing newline.
    pub fn read(source: &InputSource) -> Result<String> {
        let mut text = match source {
            InputSource::Text(text) => {
                Self::check_size(text.len())?;
                text.clone()
            }
            InputSource::File(path) => Self::read_file(path)?,
            InputSource::Stdin => Self::read_stdin()?,
        };

        if text.ends_with('\n') {
            text.pop();
            if text.ends_with('\r') {
                text.pop();
            }
        }
        Ok(text)
    }

    fn check_size(size: usize) -> Result<()> {
        if size > MAX_INPUT_SIZE {
            bail!(
                "Input size ({:.1} MB) exceeds maximum allowed size (1 MB).",
                size as f64 / 1024.0 / 1024.0
            );
        }
        Ok(())
    }

    fn read_file(path: &str) -> Result<String> {
        let metadata =
            fs::metadata(path).with_context(|| format!("Failed to access file: {path}"))?;
        Self::check_size(metadata.len() as usize)?;

        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
    }

    #[allow(clippy::significant_drop_tightening)]
    fn read_stdin() -> Result<String> {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 8192];
        let mut stdin = io::stdin().lock();

        loop {
            let bytes_read = stdin
                .read(&mut chunk)
                .context("Failed to read from stdin")?;

            if bytes_read == 0 {
                break;
            }

            buffer.extend_from_slice(&chunk[..bytes_read]);
            Self::check_size(buffer.len())?;
        }

        String::from_utf8(buffer).context("Input is not valid UTF-8")
    }
}
