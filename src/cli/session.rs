use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::{ConfigFile, ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};
use crate::credentials::{ConfigCredentialStore, CredentialStore};
use crate::push::{APP_TOKEN_KEY, PushClient, ReqwestTransport};

/// Resolved configuration plus the credential store backing it.
pub struct Session {
    pub config: ResolvedConfig,
    pub credentials: Arc<ConfigCredentialStore>,
}

impl Session {
    /// Loads the config file and applies CLI and environment overrides.
    ///
    /// A token found in the environment is registered as a temporary
    /// credential, so it shadows the stored one without being saved.
    pub fn open(options: &ResolveOptions) -> Result<Self> {
        let manager = ConfigManager::new()?;
        let config_file = if manager.config_path().exists() {
            manager.load()?
        } else {
            ConfigFile::default()
        };
        let config = resolve_config(options, &config_file)?;

        let credentials = Arc::new(ConfigCredentialStore::new(manager));
        if let Some(token) = &config.env_app_token {
            credentials.set(APP_TOKEN_KEY, token, true)?;
        }

        Ok(Self {
            config,
            credentials,
        })
    }

    pub fn client(&self) -> Result<PushClient> {
        let transport =
            ReqwestTransport::new(self.config.timeout).context("Failed to create HTTP client")?;

        Ok(PushClient::new(
            &self.config.base_url,
            Arc::new(transport),
            self.credentials.clone(),
        )
        .with_backoff_policy(self.config.backoff))
    }
}
