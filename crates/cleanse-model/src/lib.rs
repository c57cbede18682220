//! Data model shared by the cleanse pipeline crates.

pub mod error;
pub mod file;
pub mod processing;
pub mod table;

pub use error::Rejection;
pub use file::{CandidateFile, FileKind, ValidationOutcome, format_file_size};
pub use processing::{
    ProcessedPayload, ProcessingRequest, ProcessingResult, ProcessingStatistics,
};
pub use table::ParsedTable;
