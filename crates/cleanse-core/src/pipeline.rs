//! Sequential intake, read, submit, render and export steps.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use cleanse_client::{
    GENERIC_FAILURE_MESSAGE, HealthStatus, ProcessingClient, ServiceConfig,
};
use cleanse_ingest::{ContentReader, IntakePolicy, candidate_from_path};
use cleanse_model::{CandidateFile, ProcessingRequest, ProcessingResult, Rejection};
use cleanse_report::{DownloadTarget, ExportService, RenderedResults, ResultsRenderer};

use crate::error::PipelineError;
use crate::session::{CompletionOutcome, Session};

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Runs one step at a time against a [`Session`].
///
/// Steps never run in parallel: each takes the session by `&mut` and the
/// only suspension points are the file read and the service round trip.
#[derive(Debug)]
pub struct Pipeline {
    policy: IntakePolicy,
    reader: ContentReader,
    client: ProcessingClient,
    renderer: ResultsRenderer,
    exporter: ExportService,
}

impl Pipeline {
    pub fn new(client: ProcessingClient) -> Self {
        Self {
            policy: IntakePolicy::default(),
            reader: ContentReader::new(),
            client,
            renderer: ResultsRenderer::default(),
            exporter: ExportService::new(),
        }
    }

    /// Build the service client from `config`.
    pub fn connect(config: ServiceConfig) -> Result<Self> {
        Ok(Self::new(ProcessingClient::new(config)?))
    }

    #[must_use]
    pub fn with_policy(mut self, policy: IntakePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: ResultsRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Inspect `path`, gate it through the intake policy and apply the
    /// decision to the session.
    pub fn intake(
        &self,
        session: &mut Session,
        path: &Path,
        media_type: Option<&str>,
    ) -> Result<CandidateFile> {
        let candidate = match candidate_from_path(path, media_type) {
            Ok(candidate) => candidate,
            Err(error) => {
                warn!(path = %path.display(), %error, "could not inspect file");
                session.record_error(error.user_message());
                return Err(error.into());
            }
        };
        let outcome = self.policy.validate(candidate);
        if let Some(rejection) = outcome.rejection() {
            session.select(outcome);
            return Err(rejection.into());
        }
        session
            .select(outcome)
            .cloned()
            .ok_or(PipelineError::NoFileSelected)
    }

    /// Read, submit and render the active file.
    ///
    /// Read and transport failures are reported to the user with one generic
    /// message; the cause is only logged. A failure leaves any earlier
    /// result in the session.
    ///
    /// The session is borrowed for the whole call, so the ticket taken here
    /// is always current when the response lands and the `Superseded` arm
    /// stays unreachable from this method. The generation check matters to
    /// callers that drive [`Session::begin_submission`] and
    /// [`Session::complete`] themselves and release the session between them.
    pub async fn process(&self, session: &mut Session) -> Result<RenderedResults> {
        let file = session
            .active_file()
            .cloned()
            .ok_or(PipelineError::NoFileSelected)?;
        let file_type = file
            .kind()
            .ok_or(PipelineError::Validation(Rejection::UnsupportedType))?;
        let ticket = session.begin_submission();
        info!(file = %file.name, size = file.size, %file_type, "processing file");

        let data = match self.reader.read(&file).await {
            Ok(data) => data,
            Err(error) => {
                warn!(file = %file.name, %error, "reading file failed");
                session.complete(ticket, ProcessingResult::failure(GENERIC_FAILURE_MESSAGE));
                return Err(error.into());
            }
        };

        let request = ProcessingRequest {
            file_name: file.name.clone(),
            file_type,
            data,
        };
        let result = self.client.submit(&request).await;

        match session.complete(ticket, result) {
            CompletionOutcome::Stale => Err(PipelineError::Superseded),
            CompletionOutcome::Failed(message) => Err(PipelineError::Service(message)),
            CompletionOutcome::Succeeded => self.render(session).ok_or_else(|| {
                PipelineError::Service(GENERIC_FAILURE_MESSAGE.to_string())
            }),
        }
    }

    /// Render whatever payload the session currently holds.
    pub fn render(&self, session: &Session) -> Option<RenderedResults> {
        session.payload().map(|payload| self.renderer.render(payload))
    }

    /// Export the held processed data through `target`.
    pub fn export(
        &mut self,
        session: &Session,
        target: &dyn DownloadTarget,
    ) -> Result<PathBuf> {
        Ok(self.exporter.export(session.payload(), target)?)
    }

    /// Check the service. The outcome is informational only.
    pub async fn check_health(&self) -> HealthStatus {
        self.client.check_health().await
    }
}
