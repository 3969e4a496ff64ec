//! Snapshot and diff report persistence
//!
//! Both artifacts are written as pretty JSON keyed by kind name, then by
//! canonical identity.

#![allow(clippy::result_large_err)]

use crate::atomic::atomic_write;
use crate::errors::{serialization_error, Result};
use dynex_core::compare::DiffReport;
use dynex_core::model::SnapshotTable;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// File name used when a snapshot is saved into a directory
pub const SNAPSHOT_FILE_NAME: &str = "snapshot.json";

/// File name used when a diff report is saved into a directory
pub const REPORT_FILE_NAME: &str = "delta.json";

/// Write a snapshot as JSON, returning the file written.
///
/// # Errors
///
/// Returns `Io` or `Serialization` on failure.
pub fn save_snapshot(table: &SnapshotTable, path: &Path) -> Result<PathBuf> {
    save_json(table, path, SNAPSHOT_FILE_NAME, "save_snapshot")
}

/// Write a diff report as JSON, returning the file written.
///
/// # Errors
///
/// Returns `Io` or `Serialization` on failure.
pub fn save_report(report: &DiffReport, path: &Path) -> Result<PathBuf> {
    save_json(report, path, REPORT_FILE_NAME, "save_report")
}

/// Resolve where an artifact lands.
///
/// An existing directory, or a path without an extension, is treated as a
/// directory receiving `default_name`.
pub fn output_file(path: &Path, default_name: &str) -> PathBuf {
    if path.is_dir() || path.extension().is_none() {
        path.join(default_name)
    } else {
        path.to_path_buf()
    }
}

fn save_json<T: Serialize>(value: &T, path: &Path, default_name: &str, op: &str) -> Result<PathBuf> {
    let target = output_file(path, default_name);
    let mut json = serde_json::to_string_pretty(value).map_err(|e| serialization_error(op, e))?;
    json.push('\n');
    atomic_write(&target, json.as_bytes())?;
    tracing::debug!(op, path = %target.display(), bytes = json.len(), "artifact written");
    Ok(target)
}
