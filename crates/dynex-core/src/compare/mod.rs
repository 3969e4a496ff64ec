//! Snapshot comparison.
//!
//! ## Entry point
//!
//! ```ignore
//! use dynex_core::compare::compute_diff;
//!
//! let report = compute_diff(&old, &new, Some(&mapping))?;
//! let summary = dynex_core::compare::render_human_summary(&report);
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: report order follows old-table order.
//! - **Only changes**: identities without a differing field are not reported.
//! - **Fail fast**: structural errors abort before any report is returned.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::compute_diff;
pub use human_summary::render_human_summary;
pub use model::{DiffReport, FieldDiff, FieldDiffs};
