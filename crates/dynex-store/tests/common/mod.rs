//! Shared helpers for store integration tests

#![allow(dead_code)]

use dynex_core::model::{Fields, FieldValue, Record, SnapshotTable};
use dynex_core::SnapshotBuilder;
use std::fs;
use std::path::{Path, PathBuf};

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

pub fn fields(pairs: &[(&str, FieldValue)]) -> Fields {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

pub fn table(entries: Vec<(Record, Fields)>) -> SnapshotTable {
    let mut builder = SnapshotBuilder::new();
    for (identity, fields) in entries {
        builder.merge_entry(identity, fields.into());
    }
    builder.finish()
}
