pub mod analyze;
pub mod compare;
pub mod list;

use dynex_core::errors::ExError;
use dynex_core::model::SnapshotTable;
use dynex_core::{DynexConfig, TechFile};
use std::path::Path;

/// Result type for command handlers
pub type CommandResult<T = ()> = Result<T, ExError>;

/// Build the snapshot of one tech file with the VOSS parsers.
pub fn build_snapshot(path: &Path, config: &DynexConfig) -> CommandResult<SnapshotTable> {
    let table = TechFile::new(path)
        .with_options(config.extract)
        .build(dynex_voss::registry())?;
    Ok(table)
}
