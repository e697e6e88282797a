//! Subcommand implementations.

/// Configure command handler.
pub mod configure;

/// Language listing.
pub mod languages;

/// Search push command handler.
pub mod search;
