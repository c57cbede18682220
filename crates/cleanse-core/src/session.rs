//! Single-file session state.
//!
//! A [`Session`] holds at most one accepted file and at most one processed
//! payload. The payload is only ever replaced wholesale by a successful
//! submission, so the preview and any export always read the same text.
//!
//! Every selection, clear and submission advances a generation counter.
//! A submission's result is applied only if its [`SubmissionTicket`] still
//! carries the latest generation; anything older is dropped.

use tracing::debug;

use cleanse_model::{CandidateFile, ProcessedPayload, ProcessingResult, ValidationOutcome};

/// Identifies one submission. Compared against the session generation
/// when the result comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket {
    generation: u64,
}

impl SubmissionTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What [`Session::complete`] did with a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The ticket was outdated; session state is unchanged.
    Stale,
    /// The payload now held by the session was replaced.
    Succeeded,
    /// The failure message is now the session error; any earlier payload is kept.
    Failed(String),
}

#[derive(Debug, Default)]
pub struct Session {
    active_file: Option<CandidateFile>,
    payload: Option<ProcessedPayload>,
    last_error: Option<String>,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_file(&self) -> Option<&CandidateFile> {
        self.active_file.as_ref()
    }

    pub fn payload(&self) -> Option<&ProcessedPayload> {
        self.payload.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply an intake decision.
    ///
    /// Acceptance resets the file/result pair and clears the error.
    /// Rejection only records the error; the current file and payload stay.
    pub fn select(&mut self, outcome: ValidationOutcome) -> Option<&CandidateFile> {
        match outcome {
            ValidationOutcome::Accepted(file) => {
                debug!(file = %file.name, "file accepted into session");
                self.bump();
                self.payload = None;
                self.last_error = None;
                self.active_file = Some(file);
                self.active_file.as_ref()
            }
            ValidationOutcome::Rejected(rejection) => {
                self.last_error = Some(rejection.user_message().to_string());
                None
            }
        }
    }

    /// Drop the active file, the held payload and the displayed error.
    pub fn clear(&mut self) {
        self.bump();
        self.active_file = None;
        self.payload = None;
        self.last_error = None;
    }

    /// Record an error message without touching the file or payload.
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    /// Start a submission. Any ticket issued before this one becomes stale.
    pub fn begin_submission(&mut self) -> SubmissionTicket {
        self.bump();
        SubmissionTicket {
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: SubmissionTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply a submission result if its ticket is still current.
    pub fn complete(
        &mut self,
        ticket: SubmissionTicket,
        result: ProcessingResult,
    ) -> CompletionOutcome {
        if !self.is_current(ticket) {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale processing result"
            );
            return CompletionOutcome::Stale;
        }
        match result {
            ProcessingResult::Success(payload) => {
                self.payload = Some(payload);
                self.last_error = None;
                CompletionOutcome::Succeeded
            }
            ProcessingResult::Failure { message } => {
                self.last_error = Some(message.clone());
                CompletionOutcome::Failed(message)
            }
        }
    }

    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cleanse_model::{ProcessingStatistics, Rejection};

    fn accepted(name: &str) -> ValidationOutcome {
        ValidationOutcome::Accepted(CandidateFile::new(name, name, 10, "text/csv"))
    }

    fn success(data: &str) -> ProcessingResult {
        ProcessingResult::Success(ProcessedPayload::new(
            ProcessingStatistics::default(),
            data,
        ))
    }

    #[test]
    fn acceptance_resets_result_and_error() {
        let mut session = Session::new();
        session.select(accepted("a.csv"));
        let ticket = session.begin_submission();
        session.complete(ticket, success("x\n1"));
        session.record_error("old");

        session.select(accepted("b.csv"));

        assert_eq!(session.active_file().unwrap().name, "b.csv");
        assert!(session.payload().is_none());
        assert!(session.last_error().is_none());
    }

    #[test]
    fn rejection_leaves_file_and_result_untouched() {
        let mut session = Session::new();
        session.select(accepted("a.csv"));
        let ticket = session.begin_submission();
        session.complete(ticket, success("x\n1"));
        let generation = session.generation();

        let selected = session.select(ValidationOutcome::Rejected(Rejection::TooLarge));

        assert!(selected.is_none());
        assert_eq!(session.active_file().unwrap().name, "a.csv");
        assert_eq!(session.payload().unwrap().data(), Some("x\n1"));
        assert_eq!(session.generation(), generation);
        assert_eq!(
            session.last_error(),
            Some(Rejection::TooLarge.user_message())
        );
    }

    #[test]
    fn only_latest_ticket_is_applied() {
        let mut session = Session::new();
        session.select(accepted("a.csv"));
        let first = session.begin_submission();
        let second = session.begin_submission();

        assert_eq!(
            session.complete(first, success("old\n1")),
            CompletionOutcome::Stale
        );
        assert!(session.payload().is_none());
        assert_eq!(
            session.complete(second, success("new\n1")),
            CompletionOutcome::Succeeded
        );
        assert_eq!(session.payload().unwrap().data(), Some("new\n1"));
    }

    #[test]
    fn new_selection_invalidates_in_flight_ticket() {
        let mut session = Session::new();
        session.select(accepted("a.csv"));
        let ticket = session.begin_submission();
        session.select(accepted("b.csv"));

        assert_eq!(
            session.complete(ticket, success("a\n1")),
            CompletionOutcome::Stale
        );
        assert!(session.payload().is_none());
    }

    #[test]
    fn failure_keeps_previous_payload() {
        let mut session = Session::new();
        session.select(accepted("a.csv"));
        let ticket = session.begin_submission();
        session.complete(ticket, success("a\n1"));

        let ticket = session.begin_submission();
        let outcome = session.complete(ticket, ProcessingResult::failure("bad input"));

        assert_eq!(outcome, CompletionOutcome::Failed("bad input".to_string()));
        assert_eq!(session.last_error(), Some("bad input"));
        assert_eq!(session.payload().unwrap().data(), Some("a\n1"));
    }

    #[test]
    fn clear_drops_everything_and_invalidates_tickets() {
        let mut session = Session::new();
        session.select(accepted("a.csv"));
        let ticket = session.begin_submission();
        session.clear();

        assert!(session.active_file().is_none());
        assert!(!session.is_current(ticket));
        assert_eq!(
            session.complete(ticket, success("a\n1")),
            CompletionOutcome::Stale
        );
    }
}
