//! Diagnostic logging setup.
//!
//! Logs go to stderr through `tracing-subscriber`. The filter is read from
//! `JUREMY_PUSH_LOG` (same syntax as `RUST_LOG`).

use anyhow::{Result, anyhow};
use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "JUREMY_PUSH_LOG";

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "juremy_push=debug" } else { "warn" }
}

/// Guards against installing the subscriber twice.
static INIT: Once = Once::new();

/// Installs the global subscriber. Calling it again is a no-op.
pub fn init_tracing(verbose: bool) -> Result<()> {
    let mut result = Ok(());
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

        result = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .map_err(|err| anyhow!(err));
    });
    result
}
