//! Intake gate for candidate files.
//!
//! A file is accepted when its declared media type OR its name suffix is one
//! of the supported tabular formats. Browsers and file managers report media
//! types unreliably, so either signal suffices. The size ceiling applies to
//! every file regardless of type.

use std::path::Path;

use cleanse_model::{CandidateFile, Rejection, ValidationOutcome};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Largest accepted file, in bytes (10 MiB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Declared media types accepted without looking at the name.
pub const ALLOWED_MEDIA_TYPES: [&str; 4] =
    ["text/csv", "application/json", "text/xml", "application/xml"];

/// Name suffixes accepted regardless of the declared media type.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["csv", "json", "xml"];

/// Type and size policy applied to every candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntakePolicy {
    pub max_file_size: u64,
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

impl IntakePolicy {
    pub fn with_max_file_size(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    /// Decide whether `file` may enter the pipeline. Pure over file metadata.
    pub fn validate(&self, file: CandidateFile) -> ValidationOutcome {
        if file.size > self.max_file_size {
            debug!(
                name = %file.name,
                size = file.size,
                limit = self.max_file_size,
                "rejected candidate: too large"
            );
            return ValidationOutcome::Rejected(Rejection::TooLarge);
        }
        if !is_supported_type(&file) {
            debug!(
                name = %file.name,
                media_type = %file.media_type,
                "rejected candidate: unsupported type"
            );
            return ValidationOutcome::Rejected(Rejection::UnsupportedType);
        }
        ValidationOutcome::Accepted(file)
    }
}

/// Validate with the default 10 MiB policy.
pub fn validate(file: CandidateFile) -> ValidationOutcome {
    IntakePolicy::default().validate(file)
}

fn is_supported_type(file: &CandidateFile) -> bool {
    let extension = file.extension();
    ALLOWED_MEDIA_TYPES.contains(&file.media_type.as_str())
        || ALLOWED_EXTENSIONS.contains(&extension.as_str())
}

/// Build a candidate from a path on disk.
///
/// The declared media type is whatever the caller supplies; when absent it is
/// left empty rather than guessed, so only the name suffix can vouch for it.
pub fn candidate_from_path(path: &Path, media_type: Option<&str>) -> Result<CandidateFile> {
    let metadata = std::fs::metadata(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::Metadata {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    if !metadata.is_file() {
        return Err(IngestError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(CandidateFile::new(
        path,
        name,
        metadata.len(),
        media_type.unwrap_or_default(),
    ))
}
