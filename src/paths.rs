//! XDG-style path utilities for the configuration directory.
//!
//! Prefers XDG Base Directory conventions over OS-specific locations so the
//! config file lives in the same place on every platform.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "juremy-push";

/// Returns the configuration directory for juremy-push.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/juremy-push` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/juremy-push` otherwise
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Ok(PathBuf::from(xdg).join(APP_DIR));
    }

    let home = dirs::home_dir().context("Failed to determine home directory")?;
    Ok(home.join(".config").join(APP_DIR))
}
