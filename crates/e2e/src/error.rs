//! Error taxonomy for the acceptance harness
//!
//! Transport failures (connection refused, timeout) are scenario-fatal and
//! surface as `Http`. An HTTP *error status* is not an error here — it is
//! ordinary response data that the assertion layer judges, since many
//! scenarios expect 4xx outcomes.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{context}: expected {expected}, got {actual} (body: {body})")]
    UnexpectedStatus {
        context: String,
        expected: String,
        actual: StatusCode,
        body: String,
    },

    #[error("{context}: response body is not valid JSON: {detail}")]
    InvalidBody { context: String, detail: String },

    #[error("{context}: missing field `{field}`")]
    MissingField { context: String, field: String },

    #[error("{context}: field `{field}` is not {expected}")]
    WrongType {
        context: String,
        field: String,
        expected: &'static str,
    },

    #[error("assertion failed: {0}")]
    Assertion(String),

    #[error("invalid harness configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type E2eResult<T> = Result<T, E2eError>;
