//! `dynex.toml` loading

#![allow(clippy::result_large_err)]

use crate::errors::{config_validation, io_error, Result};
use dynex_core::config::DynexConfig;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Conventional configuration file name
pub const CONFIG_FILE_NAME: &str = "dynex.toml";

/// Load configuration from a TOML file.
///
/// A file that does not exist yields the defaults.
///
/// # Errors
///
/// - `InvalidInput` if the document is not valid configuration TOML
/// - `Io` if an existing file cannot be read
pub fn load_config(path: &Path) -> Result<DynexConfig> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(DynexConfig::default());
        }
        Err(e) => return Err(io_error("load_config", e)),
    };

    parse_config_str(&content)
}

/// Parse configuration TOML held in memory.
///
/// # Errors
///
/// Returns `InvalidInput` on malformed TOML or unknown values.
pub fn parse_config_str(content: &str) -> Result<DynexConfig> {
    toml::from_str(content)
        .map_err(|e| config_validation(&format!("Failed to parse configuration: {}", e)))
}
