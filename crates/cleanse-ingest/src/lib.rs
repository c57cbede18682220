//! File intake for the cleanse pipeline.
//!
//! - [`intake`]: type and size gate for candidate files
//! - [`reader`]: asynchronous whole-file text acquisition
//! - [`csv_table`]: quote-aware CSV splitting for preview tables

pub mod csv_table;
pub mod error;
pub mod intake;
pub mod reader;

pub use csv_table::{parse_csv_table, split_csv_line};
pub use error::{IngestError, Result};
pub use intake::{
    ALLOWED_EXTENSIONS, ALLOWED_MEDIA_TYPES, IntakePolicy, MAX_FILE_SIZE, candidate_from_path,
    validate,
};
pub use reader::{ContentReader, decode_text};
