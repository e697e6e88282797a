//! Command-line interface definitions and handlers.

/// CLI argument parsing with clap.
pub mod args;

/// Subcommand implementations.
pub mod commands;

/// Shared setup for commands that talk to Juremy.
pub mod session;

pub use args::{Args, Command};
