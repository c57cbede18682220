//! Error types for talking to the processing service.

use thiserror::Error;

/// Message shown for every transport or protocol failure; the cause is logged.
pub const GENERIC_FAILURE_MESSAGE: &str = "Error while processing the file. Please try again.";

/// Failures below the level of a well-formed service reply.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    ClientBuild(String),

    /// Connection refused, DNS failure, timeout, or similar.
    #[error("service unreachable: {0}")]
    Unreachable(String),

    /// The service answered with a non-success status.
    #[error("service returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The body was not the expected JSON shape.
    #[error("malformed service response: {0}")]
    MalformedResponse(String),
}

impl TransportError {
    /// Returns a user-friendly error message suitable for display.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        GENERIC_FAILURE_MESSAGE
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::Unreachable(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

/// Result type alias for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;
