use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cleanse_client::HealthStatus;
use cleanse_model::CandidateFile;
use cleanse_report::{
    PreviewTable, RenderedResults, StatisticKind, StatisticsView, TableView,
};

pub fn print_file_info(file: &CandidateFile) {
    println!(
        "File: {} ({}, {})",
        terminal_text(&file.name),
        file.kind_label(),
        file.display_size()
    );
}

pub fn print_health(url: &str, status: &HealthStatus) {
    match status {
        HealthStatus::Available => println!("Processing service at {url} is available"),
        HealthStatus::Unavailable(reason) => {
            println!("Processing service at {url} is unavailable: {reason}");
        }
    }
}

pub fn print_results(results: &RenderedResults) {
    println!("{}", statistics_table(&results.statistics));
    println!();
    print_preview(&results.table);
}

pub fn statistics_table(view: &StatisticsView) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Statistic"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for entry in &view.entries {
        table.add_row(vec![
            Cell::new(entry.label()),
            count_cell(entry.value, tone_color(entry.kind)),
        ]);
    }
    table
}

fn print_preview(view: &TableView) {
    let Some(preview) = view.preview() else {
        println!("{}", TableView::EMPTY_MESSAGE);
        return;
    };
    println!("Preview:");
    println!("{}", preview_table(preview));
    if let Some(message) = preview.omitted_message() {
        println!("... {message}");
    }
}

/// Preview rows as a terminal table. Cell text comes from the service, so
/// control characters are shown escaped.
pub fn preview_table(preview: &PreviewTable) -> Table {
    let mut table = Table::new();
    table.set_header(
        preview
            .headers
            .iter()
            .map(|header| header_cell(&terminal_text(header)))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for row in &preview.rows {
        table.add_row(
            row.iter()
                .map(|value| Cell::new(terminal_text(value)))
                .collect::<Vec<_>>(),
        );
    }
    table
}

/// Replace control characters with their escaped form so they cannot drive
/// the terminal.
fn terminal_text(value: &str) -> String {
    if !value.chars().any(char::is_control) {
        return value.to_string();
    }
    value
        .chars()
        .map(|ch| {
            if ch.is_control() {
                ch.escape_default().to_string()
            } else {
                ch.to_string()
            }
        })
        .collect()
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn tone_color(kind: StatisticKind) -> Color {
    match kind {
        StatisticKind::RowsProcessed => Color::Blue,
        StatisticKind::MissingValuesHandled => Color::Yellow,
        StatisticKind::OutliersTreated => Color::Red,
        StatisticKind::DuplicatesRemoved => Color::Cyan,
        StatisticKind::ColumnsNormalized => Color::Green,
    }
}

fn count_cell(value: u64, color: Color) -> Cell {
    if value > 0 {
        Cell::new(value).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(value)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cleanse_model::ProcessingStatistics;
    use cleanse_report::ResultsRenderer;

    #[test]
    fn statistics_table_lists_counters_in_order() {
        let view = StatisticsView::from_statistics(&ProcessingStatistics {
            total_rows: 3,
            missing_values_handled: 1,
            outliers_treated: 0,
            duplicates_removed: 0,
            normalized_columns: 2,
        });
        let table = statistics_table(&view);
        assert_eq!(table.row_iter().count(), 5);
        let rendered = table.to_string();
        let rows = rendered.find("Rows processed").unwrap();
        let normalized = rendered.find("Columns normalized").unwrap();
        assert!(rows < normalized);
    }

    #[test]
    fn preview_escapes_terminal_control_sequences() {
        let view = ResultsRenderer::default()
            .render_table(Some("name,note\n\u{1b}[2J\u{1b}]0;owned\u{7},tab\there"));
        let preview = view.preview().expect("preview");
        let mut table = preview_table(preview);
        table.force_no_tty();
        let rendered = table.to_string();
        assert!(!rendered.contains('\u{1b}'));
        assert!(!rendered.contains('\u{7}'));
        assert!(!rendered.contains('\t'));
        assert!(rendered.contains("\\u{1b}[2J"));
        assert!(rendered.contains("tab\\there"));
    }

    #[test]
    fn plain_text_is_left_alone() {
        assert_eq!(terminal_text("Ana Müller"), "Ana Müller");
        assert_eq!(terminal_text("a\rb"), "a\\rb");
    }
}
