//! Result presentation for the cleanse pipeline.
//!
//! - **Statistics**: the five service counters in fixed order
//! - **Preview**: the processed CSV bounded to the first rows, HTML-escaped
//! - **Export**: the processed CSV packaged as a timestamped download

mod export;
mod html;
mod render;

pub use export::{
    DirectoryTarget, DownloadTarget, EXPORT_FILE_PREFIX, EXPORT_MIME_TYPE, ExportArtifact,
    ExportError, ExportService,
};
pub use render::{
    PREVIEW_ROW_LIMIT, PreviewTable, RenderedResults, ResultsRenderer, StatisticEntry,
    StatisticKind, StatisticsView, TableView,
};
