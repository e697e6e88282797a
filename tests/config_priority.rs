#![allow(clippy::unwrap_used)]
//! Config priority contract tests.
//!
//! Priority order (highest to lowest):
//! 1. CLI arguments
//! 2. Environment (app token only)
//! 3. Config file
//! 4. Built-in defaults

use serial_test::serial;
use std::time::Duration;

use juremy_push::config::{
    ConfigFile, DEFAULT_APP_TOKEN_ENV, JuremyConfig, PushConfig, ResolveOptions, resolve_config,
};
use juremy_push::push::{BackoffPolicy, DEFAULT_BASE_URL};

fn make_config_with_defaults() -> ConfigFile {
    ConfigFile {
        juremy: JuremyConfig {
            base_url: Some("http://config.local".to_string()),
            app_token_env: Some("JUREMY_PUSH_TEST_TOKEN".to_string()),
            timeout_secs: Some(10),
        },
        push: PushConfig {
            max_retries: Some(3),
            backoff_base_ms: Some(50),
        },
        ..ConfigFile::default()
    }
}

#[test]
fn cli_base_url_overrides_config() {
    let options = ResolveOptions {
        base_url: Some("http://cli.local".to_string()),
    };
    let resolved = resolve_config(&options, &make_config_with_defaults()).unwrap();
    assert_eq!(resolved.base_url, "http://cli.local");
}

#[test]
fn config_values_used_without_cli_overrides() {
    let resolved =
        resolve_config(&ResolveOptions::default(), &make_config_with_defaults()).unwrap();

    assert_eq!(resolved.base_url, "http://config.local");
    assert_eq!(resolved.timeout, Duration::from_secs(10));
    assert_eq!(
        resolved.backoff,
        BackoffPolicy {
            max_retries: 3,
            base: Duration::from_millis(50),
        }
    );
}

#[test]
fn builtin_defaults_when_nothing_configured() {
    let resolved = resolve_config(&ResolveOptions::default(), &ConfigFile::default()).unwrap();

    assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
    assert_eq!(resolved.backoff, BackoffPolicy::default());
    assert_eq!(resolved.app_token_env, DEFAULT_APP_TOKEN_ENV);
}

#[test]
fn partial_push_section_keeps_other_defaults() {
    let config: ConfigFile = toml::from_str("[push]\nmax_retries = 2\n").unwrap();
    let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();

    assert_eq!(resolved.backoff.max_retries, 2);
    assert_eq!(resolved.backoff.base, BackoffPolicy::default().base);
}

#[test]
#[serial]
fn app_token_read_from_configured_env_var() {
    unsafe { std::env::set_var("JUREMY_PUSH_TEST_TOKEN", "env-token") };

    let resolved =
        resolve_config(&ResolveOptions::default(), &make_config_with_defaults()).unwrap();

    unsafe { std::env::remove_var("JUREMY_PUSH_TEST_TOKEN") };

    assert_eq!(resolved.app_token_env, "JUREMY_PUSH_TEST_TOKEN");
    assert_eq!(resolved.env_app_token.as_deref(), Some("env-token"));
}

#[test]
#[serial]
fn blank_env_token_is_ignored() {
    unsafe { std::env::set_var("JUREMY_PUSH_TEST_TOKEN", "   ") };

    let resolved =
        resolve_config(&ResolveOptions::default(), &make_config_with_defaults()).unwrap();

    unsafe { std::env::remove_var("JUREMY_PUSH_TEST_TOKEN") };

    assert!(resolved.env_app_token.is_none());
}
