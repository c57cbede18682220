//! Re-export of processed data as a downloadable CSV artifact.

use std::path::PathBuf;

use chrono::Utc;
use thiserror::Error;
use tracing::info;

use cleanse_model::ProcessedPayload;

/// Media type declared for exported files.
pub const EXPORT_MIME_TYPE: &str = "text/csv;charset=utf-8";

/// File name prefix; the suffix is `<epoch-millis>.csv`.
pub const EXPORT_FILE_PREFIX: &str = "processed_data_";

#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing processed is held by the session.
    #[error("no processed data to export")]
    NoData,

    /// The environment cannot deliver a download.
    #[error("download target is not available")]
    UnsupportedEnvironment,

    /// Writing the artifact failed.
    #[error("failed to write export {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NoData => "No processed data available for download.",
            Self::UnsupportedEnvironment => "Downloading is not supported in this environment.",
            Self::Io { .. } => "The processed file could not be saved.",
        }
    }
}

/// A packaged CSV ready to hand to a download target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub contents: String,
}

/// Where artifacts end up. A target may decline downloads entirely.
pub trait DownloadTarget {
    fn supports_download(&self) -> bool;

    /// Where `artifact` will be written.
    fn destination(&self, artifact: &ExportArtifact) -> PathBuf;

    /// Persist the artifact and return where it landed.
    fn deliver(&self, artifact: &ExportArtifact) -> std::io::Result<PathBuf>;
}

/// Saves artifacts into an existing directory.
#[derive(Debug, Clone)]
pub struct DirectoryTarget {
    dir: PathBuf,
}

impl DirectoryTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadTarget for DirectoryTarget {
    fn supports_download(&self) -> bool {
        self.dir.is_dir()
    }

    fn destination(&self, artifact: &ExportArtifact) -> PathBuf {
        self.dir.join(&artifact.file_name)
    }

    fn deliver(&self, artifact: &ExportArtifact) -> std::io::Result<PathBuf> {
        let path = self.destination(artifact);
        std::fs::write(&path, artifact.contents.as_bytes())?;
        Ok(path)
    }
}

/// Packages the session's processed payload for download.
///
/// Keeps the last issued timestamp so two exports within the same
/// millisecond still get distinct names.
#[derive(Debug, Default)]
pub struct ExportService {
    last_stamp: Option<i64>,
}

impl ExportService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the artifact without delivering it.
    pub fn package(
        &mut self,
        payload: Option<&ProcessedPayload>,
    ) -> Result<ExportArtifact, ExportError> {
        let data = payload
            .and_then(ProcessedPayload::data)
            .ok_or(ExportError::NoData)?;
        let stamp = self.next_stamp(Utc::now().timestamp_millis());
        Ok(ExportArtifact {
            file_name: format!("{EXPORT_FILE_PREFIX}{stamp}.csv"),
            mime_type: EXPORT_MIME_TYPE,
            contents: data.to_string(),
        })
    }

    /// Package and hand the artifact to `target`.
    pub fn export(
        &mut self,
        payload: Option<&ProcessedPayload>,
        target: &dyn DownloadTarget,
    ) -> Result<PathBuf, ExportError> {
        if payload.and_then(ProcessedPayload::data).is_none() {
            return Err(ExportError::NoData);
        }
        if !target.supports_download() {
            return Err(ExportError::UnsupportedEnvironment);
        }
        let artifact = self.package(payload)?;
        let path = target
            .deliver(&artifact)
            .map_err(|source| ExportError::Io {
                path: target.destination(&artifact),
                source,
            })?;
        info!(
            path = %path.display(),
            bytes = artifact.contents.len(),
            "exported processed data"
        );
        Ok(path)
    }

    fn next_stamp(&mut self, now: i64) -> i64 {
        let stamp = match self.last_stamp {
            Some(last) if now <= last => last + 1,
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cleanse_model::ProcessingStatistics;

    struct NoDownloads;

    impl DownloadTarget for NoDownloads {
        fn supports_download(&self) -> bool {
            false
        }

        fn destination(&self, artifact: &ExportArtifact) -> PathBuf {
            PathBuf::from(&artifact.file_name)
        }

        fn deliver(&self, _artifact: &ExportArtifact) -> std::io::Result<PathBuf> {
            unreachable!("deliver must not be called when downloads are unsupported")
        }
    }

    struct ReadOnlyShare;

    impl DownloadTarget for ReadOnlyShare {
        fn supports_download(&self) -> bool {
            true
        }

        fn destination(&self, artifact: &ExportArtifact) -> PathBuf {
            PathBuf::from("/srv/exports").join(&artifact.file_name)
        }

        fn deliver(&self, _artifact: &ExportArtifact) -> std::io::Result<PathBuf> {
            Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only share",
            ))
        }
    }

    fn payload(data: &str) -> ProcessedPayload {
        ProcessedPayload::new(ProcessingStatistics::default(), data)
    }

    #[test]
    fn export_without_result_is_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let target = DirectoryTarget::new(dir.path());
        let error = ExportService::new()
            .export(None, &target)
            .expect_err("no data");
        assert!(matches!(error, ExportError::NoData));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn export_with_empty_processed_data_is_no_data() {
        let error = ExportService::new()
            .package(Some(&payload("")))
            .expect_err("no data");
        assert!(matches!(error, ExportError::NoData));
    }

    #[test]
    fn unsupported_target_is_reported() {
        let error = ExportService::new()
            .export(Some(&payload("a\n1")), &NoDownloads)
            .expect_err("unsupported");
        assert!(matches!(error, ExportError::UnsupportedEnvironment));
        assert_eq!(
            error.user_message(),
            "Downloading is not supported in this environment."
        );
    }

    #[test]
    fn failed_write_reports_full_destination() {
        let error = ExportService::new()
            .export(Some(&payload("a\n1")), &ReadOnlyShare)
            .expect_err("write fails");
        let ExportError::Io { path, .. } = &error else {
            panic!("expected Io, got {error:?}");
        };
        assert!(path.starts_with("/srv/exports"));
        assert!(error.to_string().contains("/srv/exports/processed_data_"));
        assert_eq!(error.user_message(), "The processed file could not be saved.");
    }

    #[test]
    fn missing_directory_is_unsupported() {
        let target = DirectoryTarget::new("/definitely/not/a/dir");
        assert!(!target.supports_download());
    }

    #[test]
    fn artifact_carries_csv_text_and_timestamped_name() {
        let artifact = ExportService::new()
            .package(Some(&payload("a,b\n1,2")))
            .unwrap();
        assert_eq!(artifact.mime_type, "text/csv;charset=utf-8");
        assert_eq!(artifact.contents, "a,b\n1,2");
        let stamp = artifact
            .file_name
            .strip_prefix(EXPORT_FILE_PREFIX)
            .and_then(|rest| rest.strip_suffix(".csv"))
            .expect("processed_data_<millis>.csv");
        assert!(stamp.parse::<i64>().is_ok());
    }

    #[test]
    fn repeated_exports_never_share_a_name() {
        let mut service = ExportService::new();
        assert_eq!(service.next_stamp(1_000), 1_000);
        assert_eq!(service.next_stamp(1_000), 1_001);
        assert_eq!(service.next_stamp(999), 1_002);
        assert_eq!(service.next_stamp(5_000), 5_000);
    }

    #[test]
    fn export_writes_file_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = DirectoryTarget::new(dir.path());
        let mut service = ExportService::new();
        let data = payload("name\nAna\n");

        let first = service.export(Some(&data), &target).unwrap();
        let second = service.export(Some(&data), &target).unwrap();

        assert_ne!(first, second);
        assert_eq!(std::fs::read_to_string(&first).unwrap(), "name\nAna\n");
        assert_eq!(std::fs::read_to_string(&second).unwrap(), "name\nAna\n");
    }
}
