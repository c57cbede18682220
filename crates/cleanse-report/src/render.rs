//! Statistics summary and bounded preview table.

use cleanse_ingest::parse_csv_table;
use cleanse_model::{ParsedTable, ProcessedPayload, ProcessingStatistics};
use tracing::debug;

/// Maximum number of data rows shown in the preview (header excluded).
pub const PREVIEW_ROW_LIMIT: usize = 100;

/// The five counters reported by the processing service, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatisticKind {
    RowsProcessed,
    MissingValuesHandled,
    OutliersTreated,
    DuplicatesRemoved,
    ColumnsNormalized,
}

impl StatisticKind {
    pub const ORDER: [StatisticKind; 5] = [
        StatisticKind::RowsProcessed,
        StatisticKind::MissingValuesHandled,
        StatisticKind::OutliersTreated,
        StatisticKind::DuplicatesRemoved,
        StatisticKind::ColumnsNormalized,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::RowsProcessed => "Rows processed",
            Self::MissingValuesHandled => "Missing values",
            Self::OutliersTreated => "Outliers",
            Self::DuplicatesRemoved => "Duplicates removed",
            Self::ColumnsNormalized => "Columns normalized",
        }
    }

    /// CSS class suffix used by the HTML rendering.
    pub const fn tone(self) -> &'static str {
        match self {
            Self::RowsProcessed => "primary",
            Self::MissingValuesHandled => "warning",
            Self::OutliersTreated => "danger",
            Self::DuplicatesRemoved => "info",
            Self::ColumnsNormalized => "success",
        }
    }

    fn value_in(self, stats: &ProcessingStatistics) -> u64 {
        match self {
            Self::RowsProcessed => stats.total_rows,
            Self::MissingValuesHandled => stats.missing_values_handled,
            Self::OutliersTreated => stats.outliers_treated,
            Self::DuplicatesRemoved => stats.duplicates_removed,
            Self::ColumnsNormalized => stats.normalized_columns,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatisticEntry {
    pub kind: StatisticKind,
    pub value: u64,
}

impl StatisticEntry {
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

/// Labeled counters, passed through from the service without recomputation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsView {
    pub entries: Vec<StatisticEntry>,
}

impl StatisticsView {
    pub fn from_statistics(stats: &ProcessingStatistics) -> Self {
        let entries = StatisticKind::ORDER
            .into_iter()
            .map(|kind| StatisticEntry {
                kind,
                value: kind.value_in(stats),
            })
            .collect();
        Self { entries }
    }

    pub fn values(&self) -> Vec<u64> {
        self.entries.iter().map(|entry| entry.value).collect()
    }
}

/// Preview rows aligned to the header width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Data rows beyond the preview limit that were not rendered.
    pub omitted_rows: usize,
}

impl PreviewTable {
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn omitted_message(&self) -> Option<String> {
        (self.omitted_rows > 0)
            .then(|| format!("{} more rows (download the full file)", self.omitted_rows))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableView {
    /// Nothing to show; rendered as a single placeholder row.
    Empty,
    Preview(PreviewTable),
}

impl TableView {
    pub const EMPTY_MESSAGE: &'static str = "No data to display";

    pub fn preview(&self) -> Option<&PreviewTable> {
        match self {
            Self::Empty => None,
            Self::Preview(table) => Some(table),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResults {
    pub statistics: StatisticsView,
    pub table: TableView,
}

/// Turns a successful processing payload into displayable views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultsRenderer {
    row_limit: usize,
}

impl Default for ResultsRenderer {
    fn default() -> Self {
        Self {
            row_limit: PREVIEW_ROW_LIMIT,
        }
    }
}

impl ResultsRenderer {
    pub fn with_row_limit(row_limit: usize) -> Self {
        Self { row_limit }
    }

    pub fn row_limit(&self) -> usize {
        self.row_limit
    }

    pub fn render(&self, payload: &ProcessedPayload) -> RenderedResults {
        RenderedResults {
            statistics: StatisticsView::from_statistics(&payload.statistics),
            table: self.render_table(payload.data()),
        }
    }

    /// Parse processed CSV text and bound it to the preview limit.
    pub fn render_table(&self, processed_data: Option<&str>) -> TableView {
        let Some(text) = processed_data.filter(|text| !text.is_empty()) else {
            return TableView::Empty;
        };
        let parsed = parse_csv_table(text);
        if parsed.headers.is_empty() {
            return TableView::Empty;
        }
        TableView::Preview(self.bound(parsed))
    }

    fn bound(&self, parsed: ParsedTable) -> PreviewTable {
        let ParsedTable { headers, rows } = parsed;
        let total = rows.len();
        let width = headers.len();
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .take(self.row_limit)
            .map(|row| align_row(row, width))
            .collect();
        let omitted_rows = total.saturating_sub(rows.len());
        debug!(
            columns = width,
            shown = rows.len(),
            omitted = omitted_rows,
            "bounded preview table"
        );
        PreviewTable {
            headers,
            rows,
            omitted_rows,
        }
    }
}

/// Pad short rows with empty cells and drop fields past the header width.
fn align_row(mut row: Vec<String>, width: usize) -> Vec<String> {
    row.resize(width, String::new());
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv_with_rows(count: usize) -> String {
        let mut text = String::from("id,value\n");
        for idx in 0..count {
            text.push_str(&format!("{idx},{}\n", idx * 2));
        }
        text
    }

    #[test]
    fn statistics_keep_fixed_order() {
        let stats = ProcessingStatistics {
            total_rows: 3,
            missing_values_handled: 1,
            outliers_treated: 0,
            duplicates_removed: 0,
            normalized_columns: 2,
        };
        let view = StatisticsView::from_statistics(&stats);
        assert_eq!(view.values(), vec![3, 1, 0, 0, 2]);
        assert_eq!(view.entries[0].label(), "Rows processed");
        assert_eq!(view.entries[4].label(), "Columns normalized");
    }

    #[test]
    fn long_tables_are_capped_with_omitted_count() {
        let view = ResultsRenderer::default().render_table(Some(&csv_with_rows(150)));
        let table = view.preview().expect("preview");
        assert_eq!(table.rows.len(), 100);
        assert_eq!(table.omitted_rows, 50);
        assert_eq!(
            table.omitted_message().as_deref(),
            Some("50 more rows (download the full file)")
        );
    }

    #[test]
    fn exactly_limit_rows_has_no_summary() {
        let view = ResultsRenderer::default().render_table(Some(&csv_with_rows(100)));
        let table = view.preview().expect("preview");
        assert_eq!(table.rows.len(), 100);
        assert_eq!(table.omitted_message(), None);
    }

    #[test]
    fn rows_are_aligned_to_headers() {
        let view = ResultsRenderer::default().render_table(Some("a,b,c\n1\n1,2,3,4,5"));
        let table = view.preview().expect("preview");
        assert_eq!(table.rows[0], vec!["1", "", ""]);
        assert_eq!(table.rows[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn absent_or_blank_data_is_empty() {
        let renderer = ResultsRenderer::default();
        assert_eq!(renderer.render_table(None), TableView::Empty);
        assert_eq!(renderer.render_table(Some("")), TableView::Empty);
        assert_eq!(renderer.render_table(Some("\n")), TableView::Empty);
    }

    #[test]
    fn custom_limit_is_honored() {
        let view = ResultsRenderer::with_row_limit(2).render_table(Some(&csv_with_rows(5)));
        let table = view.preview().expect("preview");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.omitted_rows, 3);
    }
}
