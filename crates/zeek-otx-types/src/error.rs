//! Error types for zeek-otx.

use thiserror::Error;

/// Result type alias for zeek-otx operations.
pub type Result<T> = std::result::Result<T, OtxError>;

/// Errors that can occur while retrieving pulses and writing intel.
#[derive(Error, Debug)]
pub enum OtxError {
    /// The API rejected the key (HTTP 403).
    #[error("invalid API key")]
    Authentication,

    /// The API rejected the request (HTTP 400).
    #[error("invalid request")]
    BadRequest,

    /// The API returned a status outside the documented set.
    #[error("unexpected response status: {status}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
    },

    /// HTTP transport failure.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Response body was not valid pulse JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OtxError {
    /// Returns true if this error came from the remote API rejecting
    /// the request outright (authentication or request validation).
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Authentication | Self::BadRequest)
    }
}
