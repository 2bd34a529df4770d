//! Error types for the StudioFlow domain vocabulary

use thiserror::Error;

/// Result type alias using the common Error
pub type Result<T> = std::result::Result<T, Error>;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("unrecognized {kind} value: {value}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: String, end: String },
}
