//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Merge Semantics:
//! - Defaults → Global → Local: field-wise override, lists REPLACE
//! - Any → Env vars: REPLACE (explicit user override)
//!
//! Note: These tests run without a global config (temp directories only),
//! so they effectively test local config merging with defaults.

use std::fs;

use tempfile::TempDir;

use sagatree::application::ApplicationError;
use sagatree::config::{local_config_path, Settings};

#[test]
fn given_no_local_config_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.sources, Settings::default().sources);
    assert_eq!(settings.http_timeout_secs, 10);
}

#[test]
fn given_local_config_with_sources_when_load_then_replaces_candidate_list() {
    let dir = TempDir::new().unwrap();
    let local = r#"
sources = ["mirror/one_piece_anime.json"]
"#;
    fs::write(local_config_path(dir.path()), local).unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Replaced, not unioned: candidate order is significant
    assert_eq!(settings.sources, ["mirror/one_piece_anime.json"]);
    assert_eq!(settings.saga_files, Settings::default().saga_files);
}

#[test]
fn given_local_config_with_url_base_when_load_then_base_kept_verbatim() {
    let dir = TempDir::new().unwrap();
    let local = r#"
base = "https://example.org/op/"
http_timeout_secs = 3
"#;
    fs::write(local_config_path(dir.path()), local).unwrap();

    let settings = Settings::load(Some(dir.path())).unwrap();

    assert_eq!(settings.base, "https://example.org/op/");
    assert_eq!(settings.http_timeout_secs, 3);
}

#[test]
fn given_local_config_with_empty_sources_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "sources = []\n").unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_invalid_toml_when_load_then_config_error_names_file() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "sources = [\n").unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(err.to_string().contains(".sagatree.toml"), "{err}");
}

#[test]
fn given_loaded_settings_when_showing_then_toml_round_trips() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::load(Some(dir.path())).unwrap();

    let shown = settings.to_toml().unwrap();

    let parsed: Settings = toml::from_str(&shown).unwrap();
    assert_eq!(parsed, settings);
}
