mod manager;

pub use manager::{
    ConfigFile, ConfigManager, DEFAULT_APP_TOKEN_ENV, JuremyConfig, PushConfig, ResolveOptions,
    ResolvedConfig, resolve_config,
};
