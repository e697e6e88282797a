//! # juremy-push - Search push client for Juremy
//!
//! `juremy-push` sends the segment you are translating to the Juremy
//! terminology lookup app, which shows matching documents in its own window.
//! Nothing is translated locally and no results come back; the push itself
//! is the product.
//!
//! ## Delivery model
//!
//! - **Routing**: Juremy hands out a routing header from its `setup-route`
//!   endpoint. It is cached and reused until a push is answered with 421.
//! - **Retries**: a 421 push sets up the route again and retries with
//!   jittered exponential backoff, giving up after six failures.
//! - **Single flight**: only the latest search keeps retrying. An older one
//!   that is still waiting to retry stops silently.
//!
//! ## Quick Start
//!
//! ```bash
//! # Store the app token and test the connection
//! juremy-push configure
//!
//! # Push a search
//! juremy-push search --from EN --to HU --text "legal basis"
//!
//! # Push the contents of a file
//! juremy-push search --from DE --to EN ./segment.txt
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/juremy-push/config.toml`:
//!
//! ```toml
//! [juremy]
//! base_url = "https://juremy.com"
//! timeout_secs = 30
//!
//! [push]
//! max_retries = 6
//! backoff_base_ms = 100
//!
//! [credentials]
//! "juremy.app.token" = "..."
//! ```

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management.
pub mod config;

/// Credential storage (app token).
pub mod credentials;

/// File system utilities.
pub mod fs;

/// Input reading from inline text, files and stdin.
pub mod input;

/// `tracing` subscriber setup.
pub mod logging;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Juremy push client: routing, backoff and search sequencing.
pub mod push;

/// Terminal UI components (spinner, colors).
pub mod ui;
