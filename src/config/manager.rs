use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::fs::atomic_write;
use crate::paths;
use crate::push::{BackoffPolicy, DEFAULT_BASE_URL};

/// Environment variable consulted for the app token unless configured otherwise.
pub const DEFAULT_APP_TOKEN_ENV: &str = "JUREMY_APP_TOKEN";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings in the `[juremy]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JuremyConfig {
    /// Juremy server, without the API path.
    pub base_url: Option<String>,
    /// Environment variable holding an app token that overrides the stored one.
    pub app_token_env: Option<String>,
    /// HTTP request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Retry settings in the `[push]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PushConfig {
    /// Retryable failures tolerated before giving up.
    pub max_retries: Option<u32>,
    /// Backoff multiplier in milliseconds.
    pub backoff_base_ms: Option<u64>,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/juremy-push/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub juremy: JuremyConfig,
    #[serde(default)]
    pub push: PushConfig,
    /// Persisted credentials keyed by name (e.g. `juremy.app.token`).
    #[serde(default)]
    pub credentials: BTreeMap<String, String>,
}

/// Resolved configuration after merging CLI arguments, environment and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub backoff: BackoffPolicy,
    /// Token taken from the environment, if any.
    pub env_app_token: Option<String>,
    /// Name of the environment variable that was consulted.
    pub app_token_env: String,
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub base_url: Option<String>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// Priority: CLI options, then environment, then config file, then built-in
/// defaults.
///
/// # Errors
///
/// Returns an error if the base URL is not an http(s) URL or a numeric
/// setting is out of range.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let base_url = options
        .base_url
        .as_ref()
        .or(config_file.juremy.base_url.as_ref())
        .map_or(DEFAULT_BASE_URL, String::as_str)
        .trim()
        .trim_end_matches('/')
        .to_string();

    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        bail!(
            "Invalid base URL: '{base_url}'\n\n\
             The Juremy base URL must start with http:// or https://"
        );
    }

    let timeout_secs = config_file
        .juremy
        .timeout_secs
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        bail!("Invalid configuration: 'timeout_secs' must be greater than 0");
    }

    let defaults = BackoffPolicy::default();
    let backoff = BackoffPolicy {
        max_retries: config_file.push.max_retries.unwrap_or(defaults.max_retries),
        base: config_file
            .push
            .backoff_base_ms
            .map_or(defaults.base, Duration::from_millis),
    };

    let app_token_env = config_file
        .juremy
        .app_token_env
        .clone()
        .unwrap_or_else(|| DEFAULT_APP_TOKEN_ENV.to_string());
    let env_app_token = std::env::var(&app_token_env)
        .ok()
        .filter(|token| !token.trim().is_empty());

    Ok(ResolvedConfig {
        base_url,
        timeout: Duration::from_secs(timeout_secs),
        backoff,
        env_app_token,
        app_token_env,
    })
}

/// Manages loading and saving configuration files.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/juremy-push/config.toml`
    /// or `~/.config/juremy-push/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        atomic_write(&self.config_path, &contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }

    pub fn load_or_default(&self) -> ConfigFile {
        self.load().unwrap_or_default()
    }
}
