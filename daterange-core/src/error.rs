//! Error types for daterange.

use thiserror::Error;

/// Errors that can occur while reading host input.
///
/// Render and input-event paths never surface these; they degrade to a
/// no-op or a clear directive instead.
#[derive(Error, Debug)]
pub enum DateRangeError {
    #[error("Invalid host payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Unknown field type '{0}'")]
    UnknownFieldType(String),

    #[error("Unparseable date: '{0}'")]
    InvalidDate(String),
}

/// Result type alias for daterange operations.
pub type DateRangeResult<T> = Result<T, DateRangeError>;
