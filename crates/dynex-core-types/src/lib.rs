//! Core types shared across dynex facilities
//!
//! This crate holds the canonical schema constants used by both the error
//! and logging facilities, so every crate in the workspace emits the same
//! field keys and event names.

pub mod schema;
