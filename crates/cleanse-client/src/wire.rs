//! Response shape returned by the processing service.

use serde::Deserialize;

use cleanse_model::{ProcessedPayload, ProcessingResult, ProcessingStatistics};

use crate::error::{Result, TransportError};

/// Shown when the service reports failure without saying why.
pub const DEFAULT_SERVICE_MESSAGE: &str = "The processing service could not process the file.";

/// Raw reply body: `{success, message?, statistics?, processedData?}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub statistics: Option<ProcessingStatistics>,
    #[serde(default)]
    pub processed_data: Option<String>,
}

impl ServiceResponse {
    /// Map a well-formed reply onto the normalized result.
    ///
    /// A successful reply must at least carry `statistics`; the counters and
    /// the processed text are otherwise passed through untouched.
    pub fn into_result(self) -> Result<ProcessingResult> {
        if !self.success {
            let message = self
                .message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SERVICE_MESSAGE.to_string());
            return Ok(ProcessingResult::failure(message));
        }
        let statistics = self.statistics.ok_or_else(|| {
            TransportError::MalformedResponse("successful reply without statistics".to_string())
        })?;
        Ok(ProcessingResult::Success(ProcessedPayload {
            statistics,
            processed_data: self.processed_data,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> ServiceResponse {
        serde_json::from_str(body).expect("valid reply")
    }

    #[test]
    fn success_reply_passes_payload_through() {
        let reply = parse(
            r#"{"success":true,"statistics":{"totalRows":2,"missingValuesHandled":0,
                "outliersTreated":1,"duplicatesRemoved":0,"normalizedColumns":0},
                "processedData":"a\n1\n2"}"#,
        );
        let result = reply.into_result().unwrap();
        let payload = result.payload().expect("success");
        assert_eq!(payload.statistics.total_rows, 2);
        assert_eq!(payload.statistics.outliers_treated, 1);
        assert_eq!(payload.data(), Some("a\n1\n2"));
    }

    #[test]
    fn success_without_processed_data_is_kept() {
        let reply = parse(
            r#"{"success":true,"statistics":{"totalRows":0,"missingValuesHandled":0,
                "outliersTreated":0,"duplicatesRemoved":0,"normalizedColumns":0}}"#,
        );
        let result = reply.into_result().unwrap();
        assert!(!result.payload().unwrap().has_data());
    }

    #[test]
    fn success_without_statistics_is_malformed() {
        let reply = parse(r#"{"success":true,"processedData":"a\n1"}"#);
        assert!(matches!(
            reply.into_result(),
            Err(TransportError::MalformedResponse(_))
        ));
    }

    #[test]
    fn failure_reply_keeps_service_message() {
        let reply = parse(r#"{"success":false,"message":"Unsupported delimiter"}"#);
        let result = reply.into_result().unwrap();
        assert_eq!(result.message(), Some("Unsupported delimiter"));
    }

    #[test]
    fn failure_reply_without_message_uses_default() {
        let reply = parse(r#"{"success":false}"#);
        let result = reply.into_result().unwrap();
        assert_eq!(result.message(), Some(DEFAULT_SERVICE_MESSAGE));
    }
}
