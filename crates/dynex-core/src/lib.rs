//! dynex core - tech file extraction, aggregation and structural diff
//!
//! This crate provides the pipeline that turns a network device tech file
//! into a comparable snapshot:
//! - Block extraction of command output from the raw line stream
//! - A closed, typed record model with kind-specific diff semantics
//! - A statically typed parser registry and the aggregator that merges
//!   parser output into a [`SnapshotTable`]
//! - Key mapping and the recursive comparator producing a [`DiffReport`]
//!
//! Vendor parsers live outside this crate and plug in through
//! [`ParserRegistry`].

pub mod aggregate;
pub mod compare;
pub mod config;
pub mod errors;
pub mod extract;
pub mod logging_facility;
pub mod mapping;
pub mod model;
pub mod registry;
pub mod techfile;

// Re-export commonly used types
pub use aggregate::{Aggregator, SnapshotBuilder};
pub use compare::{compute_diff, DiffReport, FieldDiff};
pub use config::DynexConfig;
pub use errors::{DynexError, ExError, ExErrorKind, ParseError, Result};
pub use extract::{BlockExtractor, CommandOutput, ExtractOptions};
pub use mapping::KeyMapping;
pub use model::{FieldValue, Fields, Kind, Record, SnapshotTable};
pub use registry::{ParsedEntry, ParsedOutput, ParserRegistry};
pub use techfile::TechFile;
