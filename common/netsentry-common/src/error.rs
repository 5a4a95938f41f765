//! Error types for backend requests
//!
//! Every endpoint call collapses into one of these variants so callers can
//! tell transport problems apart from a backend that answered with a
//! non-success status.

use thiserror::Error;

/// Errors that can occur when talking to the monitoring backend
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, ...)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the JSON we expected
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The backend answered with a non-success status
    #[error("{0}")]
    Rejected(String),

    /// A success response without the payload it should carry
    #[error("response is missing `{0}`")]
    MissingField(&'static str),

    /// The configured backend URL or endpoint path could not be parsed
    #[error("invalid backend url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Result type alias for backend operations
pub type ApiResult<T> = Result<T, ApiError>;
