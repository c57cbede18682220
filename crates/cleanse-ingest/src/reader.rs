//! Whole-file text acquisition.
//!
//! Files reaching the reader are already bounded by the intake policy, so a
//! single read is enough. There is no retry: a failed read surfaces once.

use cleanse_model::CandidateFile;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

/// Reads a candidate's full content as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentReader;

impl ContentReader {
    pub fn new() -> Self {
        Self
    }

    /// Read the whole file and decode it as text.
    ///
    /// Suspends the caller while the read is in flight.
    pub async fn read(&self, file: &CandidateFile) -> Result<String> {
        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|source| IngestError::FileRead {
                path: file.path.clone(),
                source,
            })?;
        debug!(name = %file.name, bytes = bytes.len(), "read file content");
        Ok(decode_text(&bytes))
    }
}

/// Decode bytes as UTF-8, honoring a byte-order mark and replacing malformed
/// sequences with U+FFFD.
pub fn decode_text(bytes: &[u8]) -> String {
    let (text, encoding, had_errors) = encoding_rs::UTF_8.decode(bytes);
    if had_errors {
        warn!(
            encoding = encoding.name(),
            "file content contained malformed sequences; replaced with U+FFFD"
        );
    }
    text.into_owned()
}
