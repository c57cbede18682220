use serde::{Deserialize, Serialize};

use crate::file::FileKind;

/// Body sent to the processing service. Built fresh per submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingRequest {
    pub file_name: String,
    pub file_type: FileKind,
    pub data: String,
}

/// Counters reported by the processing service, displayed verbatim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingStatistics {
    pub total_rows: u64,
    pub missing_values_handled: u64,
    pub outliers_treated: u64,
    pub duplicates_removed: u64,
    pub normalized_columns: u64,
}

/// Successful service output held by the session.
///
/// `processed_data` is the single source for both the preview table and the
/// export artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedPayload {
    pub statistics: ProcessingStatistics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_data: Option<String>,
}

impl ProcessedPayload {
    pub fn new(statistics: ProcessingStatistics, processed_data: impl Into<String>) -> Self {
        Self {
            statistics,
            processed_data: Some(processed_data.into()),
        }
    }

    /// Processed CSV text, treating an empty string like an absent one.
    pub fn data(&self) -> Option<&str> {
        self.processed_data
            .as_deref()
            .filter(|data| !data.is_empty())
    }

    pub fn has_data(&self) -> bool {
        self.data().is_some()
    }
}

/// Normalized outcome of one processing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingResult {
    Success(ProcessedPayload),
    Failure { message: String },
}

impl ProcessingResult {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn payload(&self) -> Option<&ProcessedPayload> {
        match self {
            Self::Success(payload) => Some(payload),
            Self::Failure { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure { message } => Some(message),
        }
    }
}
