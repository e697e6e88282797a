//! Credential storage.
//!
//! Credentials are plain string values under string keys. A value can be
//! stored temporarily, in which case it lives only as long as the store and
//! shadows any persisted value for the same key.

use anyhow::Result;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::config::ConfigManager;

pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str, temporary: bool) -> Result<()>;

    fn is_stored_temporarily(&self, key: &str) -> bool;
}

/// In-memory store; nothing is ever persisted.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    values: RwLock<HashMap<String, (String, bool)>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor holding a single persisted-looking value.
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .values
            .write()
            .insert(key.to_string(), (value.to_string(), false));
        store
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).map(|(value, _)| value.clone())
    }

    fn set(&self, key: &str, value: &str, temporary: bool) -> Result<()> {
        self.values
            .write()
            .insert(key.to_string(), (value.to_string(), temporary));
        Ok(())
    }

    fn is_stored_temporarily(&self, key: &str) -> bool {
        self.values
            .read()
            .get(key)
            .is_some_and(|(_, temporary)| *temporary)
    }
}

/// Store backed by the `[credentials]` table of the config file.
///
/// The file is re-read on every lookup so edits made by another process are
/// picked up.
pub struct ConfigCredentialStore {
    manager: ConfigManager,
    temporary: RwLock<HashMap<String, String>>,
}

impl ConfigCredentialStore {
    pub fn new(manager: ConfigManager) -> Self {
        Self {
            manager,
            temporary: RwLock::new(HashMap::new()),
        }
    }

    pub const fn manager(&self) -> &ConfigManager {
        &self.manager
    }
}

impl CredentialStore for ConfigCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        if let Some(value) = self.temporary.read().get(key) {
            return Some(value.clone());
        }
        self.manager.load_or_default().credentials.remove(key)
    }

    fn set(&self, key: &str, value: &str, temporary: bool) -> Result<()> {
        if temporary {
            self.temporary
                .write()
                .insert(key.to_string(), value.to_string());
            return Ok(());
        }

        self.temporary.write().remove(key);
        let mut config = self.manager.load_or_default();
        config
            .credentials
            .insert(key.to_string(), value.to_string());
        self.manager.save(&config)
    }

    fn is_stored_temporarily(&self, key: &str) -> bool {
        self.temporary.read().contains_key(key)
    }
}
