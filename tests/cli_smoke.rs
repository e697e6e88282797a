#![allow(clippy::unwrap_used)]
//! CLI smoke tests to verify basic command functionality.
//!
//! Every invocation gets its own empty config directory and no token in the
//! environment, so nothing reaches the network.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn juremy_push(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("juremy-push").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("JUREMY_APP_TOKEN")
        .env_remove("JUREMY_PUSH_LOG");
    cmd
}

#[test]
fn test_help_displays_usage() {
    let home = TempDir::new().unwrap();
    juremy_push(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Push translation searches"))
        .stdout(predicate::str::contains("configure"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("--base-url"));
}

#[test]
fn test_version_displays_version() {
    let home = TempDir::new().unwrap();
    juremy_push(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_languages_list() {
    let home = TempDir::new().unwrap();
    juremy_push(&home)
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("EN"))
        .stdout(predicate::str::contains("hun"))
        .stdout(predicate::str::contains("Irish"));
}

#[test]
fn test_search_unsupported_language() {
    let home = TempDir::new().unwrap();
    juremy_push(&home)
        .args(["search", "--from", "XX", "--to", "HU", "--text", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Language not supported"))
        .stderr(predicate::str::contains("XX"));
}

#[test]
fn test_search_without_token() {
    let home = TempDir::new().unwrap();
    juremy_push(&home)
        .args(["search", "--from", "EN", "--to", "HU", "--text", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("app token not found"));
}

#[test]
fn test_search_empty_input() {
    let home = TempDir::new().unwrap();
    juremy_push(&home)
        .args(["search", "--from", "EN", "--to", "HU"])
        .write_stdin("  \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input is empty"));
}

#[test]
fn test_search_requires_languages() {
    let home = TempDir::new().unwrap();
    juremy_push(&home)
        .args(["search", "--text", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--from"));
}

#[test]
fn test_configure_show_without_config() {
    let home = TempDir::new().unwrap();
    juremy_push(&home)
        .args(["configure", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current configuration"))
        .stdout(predicate::str::contains("https://juremy.com"))
        .stdout(predicate::str::contains("(not set)"));
}

#[test]
fn test_configure_rejects_invalid_base_url() {
    let home = TempDir::new().unwrap();
    juremy_push(&home)
        .args(["--base-url", "juremy.com", "configure", "--show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid base URL"));
}

#[test]
fn test_configure_empty_token() {
    let home = TempDir::new().unwrap();
    juremy_push(&home)
        .args(["configure", "--token", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be empty"));
}
