//! Consistent styling utilities for CLI output.
//!
//! Provides color and formatting helpers using owo-colors.

use owo_colors::OwoColorize;
use std::fmt::Display;

/// Styles for different semantic elements.
pub struct Style;

impl Style {
    /// Style for section headers (e.g., "Current configuration")
    pub fn header<T: Display>(text: T) -> String {
        format!("{}", text.bold())
    }

    /// Style for labels/keys (e.g., "base_url", "token")
    pub fn label<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }

    /// Style for primary values
    pub fn value<T: Display>(text: T) -> String {
        format!("{}", text.cyan())
    }

    /// Style for secondary/supplementary info (e.g., paths, language names)
    pub fn secondary<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }

    /// Style for success messages
    pub fn success<T: Display>(text: T) -> String {
        format!("{}", text.green())
    }

    /// Style for warning messages
    pub fn warning<T: Display>(text: T) -> String {
        format!("{}", text.yellow())
    }

    /// Style for language codes
    pub fn code<T: Display>(text: T) -> String {
        format!("{}", text.yellow())
    }

    /// Style for hints/help text
    pub fn hint<T: Display>(text: T) -> String {
        format!("{}", text.dimmed().italic())
    }
}
