//! Display-oriented CSV splitting.
//!
//! This is intentionally lighter than an RFC 4180 reader: a `"` toggles the
//! quoted state and is never emitted, so a doubled `""` inside a quoted field
//! toggles twice instead of producing a literal quote. Records cannot span
//! lines.

use cleanse_model::ParsedTable;
use tracing::trace;

const QUOTE: char = '"';
const DELIMITER: char = ',';

/// Split CSV text into a header row and data rows.
///
/// Lines are separated on `\n`; trailing lines that are empty or a lone `\r`
/// are dropped. Text with no remaining lines yields an empty table.
pub fn parse_csv_table(text: &str) -> ParsedTable {
    let mut lines: Vec<&str> = text.split('\n').collect();
    while lines
        .last()
        .is_some_and(|line| line.trim_end_matches('\r').is_empty())
    {
        lines.pop();
    }
    let mut lines = lines.into_iter();
    let Some(header_line) = lines.next() else {
        return ParsedTable::default();
    };
    let headers = split_csv_line(header_line);
    let rows: Vec<Vec<String>> = lines.map(split_csv_line).collect();
    trace!(
        columns = headers.len(),
        rows = rows.len(),
        "parsed csv preview table"
    );
    ParsedTable::new(headers, rows)
}

/// Split one line into trimmed fields, ignoring delimiters inside quotes.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for ch in line.chars() {
        match ch {
            QUOTE => in_quotes = !in_quotes,
            DELIMITER if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}
