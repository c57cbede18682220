//! Error taxonomy for the pipeline.

use thiserror::Error;

use cleanse_client::TransportError;
use cleanse_ingest::IngestError;
use cleanse_model::Rejection;
use cleanse_report::ExportError;

/// Any failure surfaced by a pipeline step.
///
/// None of these are fatal: the session stays usable after each one.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The candidate file did not pass the intake policy.
    #[error("file rejected: {0}")]
    Validation(#[from] Rejection),

    /// The file could not be inspected or read.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// The service client could not be set up or reached.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The service answered but reported failure.
    #[error("processing failed: {0}")]
    Service(String),

    /// Processing was triggered without an accepted file.
    #[error("no file selected")]
    NoFileSelected,

    /// A newer submission or selection replaced this one before it resolved.
    #[error("result discarded: superseded by a newer submission")]
    Superseded,

    /// Export of the processed data failed.
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl PipelineError {
    /// Returns the message shown to the user; the display text is for logs.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Validation(rejection) => rejection.user_message(),
            Self::Ingest(error) => error.user_message(),
            Self::Transport(error) => error.user_message(),
            Self::Service(message) => message,
            Self::NoFileSelected => "Please select a file first.",
            Self::Superseded => "A newer file replaced this one before processing finished.",
            Self::Export(error) => error.user_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_message_is_shown_verbatim() {
        let error = PipelineError::Service("Unsupported delimiter".to_string());
        assert_eq!(error.user_message(), "Unsupported delimiter");
    }

    #[test]
    fn wrapped_errors_delegate_their_message() {
        let error = PipelineError::from(Rejection::TooLarge);
        assert_eq!(error.user_message(), Rejection::TooLarge.user_message());

        let error = PipelineError::from(ExportError::NoData);
        assert_eq!(
            error.user_message(),
            "No processed data available for download."
        );

        let error = PipelineError::from(TransportError::Status { status: 502 });
        assert_eq!(
            error.user_message(),
            "Error while processing the file. Please try again."
        );
    }
}
