//! Error handling for dynex-store
//!
//! Wraps dynex-core ExError with store-specific helpers

use dynex_core::errors::{DynexError, ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a mapping document validation error
pub fn mapping_validation(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("load_mapping")
        .with_message(reason.to_string())
}

/// Create a configuration validation error
pub fn config_validation(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("load_config")
        .with_message(reason.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a serialization error
pub fn serialization_error(operation: &str, err: serde_json::Error) -> ExError {
    ExError::from(DynexError::from(err)).with_op(operation.to_string())
}
