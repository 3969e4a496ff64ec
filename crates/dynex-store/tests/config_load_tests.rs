//! Configuration file loading

mod common;

use common::write_file;
use dynex_core::errors::ExErrorKind;
use dynex_core::logging_facility::Profile;
use dynex_core::DynexConfig;
use dynex_store::load_config;
use tempfile::TempDir;

#[test]
fn test_missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let config = load_config(&dir.path().join("dynex.toml")).unwrap();
    assert_eq!(config, DynexConfig::default());
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "dynex.toml", "[logging]\nprofile = \"test\"\n");

    let config = load_config(&path).unwrap();

    assert_eq!(config.logging.profile, Profile::Test);
    assert!(config.extract.flush_trailing_block);
}

#[test]
fn test_malformed_file_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "dynex.toml", "[extract\nflush_trailing_block = 1\n");
    let err = load_config(&path).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
}
