//! Session context and the sequential processing pipeline.
//!
//! A [`Session`] is passed explicitly to each [`Pipeline`] step:
//! intake gates a file, process reads and submits it and renders the
//! reply, export re-emits the held processed data.

pub mod error;
pub mod pipeline;
pub mod session;

pub use error::PipelineError;
pub use pipeline::{Pipeline, Result};
pub use session::{CompletionOutcome, Session, SubmissionTicket};
