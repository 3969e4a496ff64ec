//! dynex store - loading inputs and persisting results
//!
//! Provides:
//! - Key-mapping documents (JSON or YAML) loaded into a `KeyMapping`
//! - `dynex.toml` runtime configuration
//! - Pretty JSON persistence of snapshots and diff reports

pub mod atomic;
pub mod config;
pub mod errors;
pub mod mapping;
pub mod report;

// Re-export key types
pub use config::load_config;
pub use errors::Result;
pub use mapping::load_mapping;
pub use report::{save_report, save_snapshot};
