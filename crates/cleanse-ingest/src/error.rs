//! Error types for file intake.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning a path into a readable candidate.
#[derive(Debug, Error)]
pub enum IngestError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Path exists but is not a regular file.
    #[error("not a regular file: {path}")]
    NotAFile { path: PathBuf },

    /// Failed to read file metadata.
    #[error("failed to inspect file {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file content.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    /// Returns the message shown to the user; the display text is for logs.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "The selected file could not be found.",
            Self::NotAFile { .. } => "The selected path is not a file.",
            Self::Metadata { .. } | Self::FileRead { .. } => {
                "Error while processing the file. Please try again."
            }
        }
    }
}

/// Result type alias for intake operations.
pub type Result<T> = std::result::Result<T, IngestError>;
