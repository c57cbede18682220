//! Processing service client.
//!
//! Sends `{fileName, fileType, data}` to the service and normalizes whatever
//! comes back into a [`ProcessingResult`]. Each submission is independent:
//! no deduplication and no retry.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, info, warn};

use cleanse_model::{ProcessingRequest, ProcessingResult};

use crate::error::{GENERIC_FAILURE_MESSAGE, Result, TransportError};
use crate::wire::ServiceResponse;

/// Default service location.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default HTTP request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Placeholder logged instead of file-derived content.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// User agent string for service requests.
const USER_AGENT_VALUE: &str = concat!("cleanse/", env!("CARGO_PKG_VERSION"));

/// Longest body excerpt written to logs when body logging is enabled.
const MAX_LOGGED_BODY: usize = 512;

/// Where and how to reach the processing service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Base URL without a trailing slash, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    /// Path of the processing endpoint.
    pub process_path: String,
    /// Path of the liveness endpoint.
    pub health_path: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Whether response bodies may appear in logs.
    pub log_bodies: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            process_path: "/process".to_string(),
            health_path: "/health".to_string(),
            timeout: DEFAULT_TIMEOUT,
            log_bodies: false,
        }
    }
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_log_bodies(mut self, enable: bool) -> Self {
        self.log_bodies = enable;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}

/// Outcome of a liveness check. Never treated as an error by callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Available,
    Unavailable(String),
}

impl HealthStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Client for the external processing service.
#[derive(Debug, Clone)]
pub struct ProcessingClient {
    http: reqwest::Client,
    config: ServiceConfig,
}

impl ProcessingClient {
    /// Creates a client for the configured service.
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;

        Ok(Self { http, config })
    }

    pub fn process_url(&self) -> String {
        self.config.endpoint(&self.config.process_path)
    }

    pub fn health_url(&self) -> String {
        self.config.endpoint(&self.config.health_path)
    }

    /// Submit a request and normalize the reply.
    ///
    /// Transport and protocol failures become a failure result carrying a
    /// generic message; the underlying cause is only logged.
    pub async fn submit(&self, request: &ProcessingRequest) -> ProcessingResult {
        match self.try_submit(request).await {
            Ok(result) => {
                if let Some(message) = result.message() {
                    warn!(
                        file = %request.file_name,
                        service_message = message,
                        "processing service reported failure"
                    );
                }
                result
            }
            Err(error) => {
                warn!(file = %request.file_name, %error, "processing request failed");
                ProcessingResult::failure(GENERIC_FAILURE_MESSAGE)
            }
        }
    }

    /// Submit a request, keeping transport failures distinct.
    pub async fn try_submit(&self, request: &ProcessingRequest) -> Result<ProcessingResult> {
        let url = self.process_url();
        debug!(
            %url,
            file = %request.file_name,
            file_type = %request.file_type,
            bytes = request.data.len(),
            "sending processing request"
        );

        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), body = %self.loggable(&body), "non-success reply");
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let reply: ServiceResponse = serde_json::from_str(&body).map_err(|error| {
            debug!(body = %self.loggable(&body), "undecodable reply body");
            TransportError::from(error)
        })?;
        let result = reply.into_result()?;
        if let Some(payload) = result.payload() {
            info!(
                file = %request.file_name,
                total_rows = payload.statistics.total_rows,
                has_data = payload.has_data(),
                "processing succeeded"
            );
        }
        Ok(result)
    }

    /// Query the liveness endpoint. Failures are logged, never raised.
    pub async fn check_health(&self) -> HealthStatus {
        let url = self.health_url();
        match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                info!(%url, "processing service is available");
                HealthStatus::Available
            }
            Ok(response) => {
                let reason = format!("HTTP {}", response.status().as_u16());
                warn!(%url, %reason, "processing service health check failed");
                HealthStatus::Unavailable(reason)
            }
            Err(error) => {
                warn!(%url, %error, "processing service is not reachable");
                HealthStatus::Unavailable(error.to_string())
            }
        }
    }

    fn loggable<'a>(&self, body: &'a str) -> &'a str {
        if !self.config.log_bodies {
            return REDACTED_VALUE;
        }
        match body.char_indices().nth(MAX_LOGGED_BODY) {
            Some((end, _)) => &body[..end],
            None => body,
        }
    }
}
