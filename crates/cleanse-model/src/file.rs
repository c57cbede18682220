use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Rejection;

/// Tabular formats the processing service understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Csv,
    Json,
    Xml,
}

impl FileKind {
    /// Match a lowercased file-name suffix.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "xml" => Some(Self::Xml),
            _ => None,
        }
    }

    /// Match a declared media type. Both XML media types map to `Xml`.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type {
            "text/csv" => Some(Self::Csv),
            "application/json" => Some(Self::Json),
            "text/xml" | "application/xml" => Some(Self::Xml),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Csv => "CSV file",
            Self::Json => "JSON file",
            Self::Xml => "XML file",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file chosen by the user but not yet validated.
///
/// `media_type` is whatever the selecting environment reported and may be
/// empty or wrong; the extension is always derived from `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub media_type: String,
}

impl CandidateFile {
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        size: u64,
        media_type: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            size,
            media_type: media_type.into(),
        }
    }

    /// Lowercased text after the last `.` of the name.
    ///
    /// A name without any `.` yields the whole name lowercased.
    pub fn extension(&self) -> String {
        self.name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }

    /// Kind derived from the name suffix, falling back to the declared media type.
    pub fn kind(&self) -> Option<FileKind> {
        FileKind::from_extension(&self.extension())
            .or_else(|| FileKind::from_media_type(&self.media_type))
    }

    /// Human label shown next to the file name.
    pub fn kind_label(&self) -> &'static str {
        FileKind::from_extension(&self.extension())
            .map(FileKind::label)
            .unwrap_or("Unknown file")
    }

    pub fn display_size(&self) -> String {
        format_file_size(self.size)
    }
}

/// Result of the intake gate. Never both accepted and rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Accepted(CandidateFile),
    Rejected(Rejection),
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(reason) => Some(*reason),
        }
    }

    pub fn into_result(self) -> Result<CandidateFile, Rejection> {
        match self {
            Self::Accepted(file) => Ok(file),
            Self::Rejected(reason) => Err(reason),
        }
    }
}

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Format a byte count with binary scaling, e.g. `1.5 KB` or `10 MB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0usize;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", SIZE_UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, media_type: &str) -> CandidateFile {
        CandidateFile::new(name, name, 10, media_type)
    }

    #[test]
    fn extension_is_lowercased_suffix() {
        assert_eq!(candidate("Report.Final.CSV", "").extension(), "csv");
        assert_eq!(candidate("data.json", "").extension(), "json");
        assert_eq!(candidate("README", "").extension(), "readme");
    }

    #[test]
    fn kind_prefers_extension_over_media_type() {
        assert_eq!(
            candidate("items.xml", "application/json").kind(),
            Some(FileKind::Xml)
        );
        assert_eq!(candidate("items.txt", "text/csv").kind(), Some(FileKind::Csv));
        assert_eq!(candidate("items.txt", "text/plain").kind(), None);
    }

    #[test]
    fn kind_label_follows_extension() {
        assert_eq!(candidate("a.csv", "").kind_label(), "CSV file");
        assert_eq!(candidate("a.XML", "").kind_label(), "XML file");
        assert_eq!(candidate("a.txt", "text/csv").kind_label(), "Unknown file");
    }

    #[test]
    fn file_sizes_are_human_readable() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10 MB");
        assert_eq!(format_file_size(1_234_567), "1.18 MB");
    }

    #[test]
    fn outcome_exposes_rejection() {
        let outcome = ValidationOutcome::Rejected(Rejection::TooLarge);
        assert!(!outcome.is_accepted());
        assert_eq!(outcome.rejection(), Some(Rejection::TooLarge));
        assert_eq!(outcome.into_result(), Err(Rejection::TooLarge));
    }
}
