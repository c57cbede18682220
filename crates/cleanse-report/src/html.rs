//! HTML rendering of results.
//!
//! All text and attribute values go through quick-xml events, which escape
//! markup-significant characters. File-derived cell values are never written
//! as raw markup.

use anyhow::Result;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::render::{PreviewTable, RenderedResults, StatisticsView, TableView};

type HtmlWriter = Writer<Vec<u8>>;

fn write_text_element(
    writer: &mut HtmlWriter,
    tag: &str,
    attributes: &[(&str, &str)],
    text: &str,
) -> Result<()> {
    let start = BytesStart::new(tag).with_attributes(attributes.iter().copied());
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn open(writer: &mut HtmlWriter, tag: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    Ok(())
}

fn close(writer: &mut HtmlWriter, tag: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn finish(writer: HtmlWriter) -> String {
    // Every event written above came from `&str`, so the buffer is UTF-8.
    String::from_utf8_lossy(&writer.into_inner()).into_owned()
}

impl TableView {
    /// Render the `<thead>`/`<tbody>` content of the preview table.
    pub fn to_html(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        write_table_body(&mut writer, self)?;
        Ok(finish(writer))
    }
}

impl StatisticsView {
    /// Render one card per counter, in display order.
    pub fn to_html(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        write_statistics(&mut writer, self)?;
        Ok(finish(writer))
    }
}

impl RenderedResults {
    /// Render a standalone HTML document with statistics and preview.
    pub fn to_html_document(&self, title: &str) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::DocType(BytesText::from_escaped("html")))?;
        open(&mut writer, "html")?;
        open(&mut writer, "head")?;
        writer.write_event(Event::Empty(
            BytesStart::new("meta").with_attributes([("charset", "utf-8")]),
        ))?;
        write_text_element(&mut writer, "title", &[], title)?;
        close(&mut writer, "head")?;
        open(&mut writer, "body")?;
        write_text_element(&mut writer, "h1", &[], title)?;
        write_statistics(&mut writer, &self.statistics)?;
        writer.write_event(Event::Start(
            BytesStart::new("table").with_attributes([("class", "preview")]),
        ))?;
        write_table_body(&mut writer, &self.table)?;
        close(&mut writer, "table")?;
        close(&mut writer, "body")?;
        close(&mut writer, "html")?;
        Ok(finish(writer))
    }
}

fn write_statistics(writer: &mut HtmlWriter, view: &StatisticsView) -> Result<()> {
    writer.write_event(Event::Start(
        BytesStart::new("div").with_attributes([("class", "statistics")]),
    ))?;
    for entry in &view.entries {
        let card_class = format!("stats-card text-{}", entry.kind.tone());
        writer.write_event(Event::Start(
            BytesStart::new("div").with_attributes([("class", card_class.as_str())]),
        ))?;
        write_text_element(
            writer,
            "div",
            &[("class", "stats-number")],
            &entry.value.to_string(),
        )?;
        write_text_element(writer, "div", &[("class", "stats-label")], entry.label())?;
        close(writer, "div")?;
    }
    close(writer, "div")
}

fn write_table_body(writer: &mut HtmlWriter, view: &TableView) -> Result<()> {
    match view {
        TableView::Empty => {
            open(writer, "tbody")?;
            write_full_width_row(writer, "100%", None, TableView::EMPTY_MESSAGE)?;
            close(writer, "tbody")
        }
        TableView::Preview(table) => write_preview(writer, table),
    }
}

fn write_preview(writer: &mut HtmlWriter, table: &PreviewTable) -> Result<()> {
    open(writer, "thead")?;
    open(writer, "tr")?;
    for header in &table.headers {
        write_text_element(writer, "th", &[], header)?;
    }
    close(writer, "tr")?;
    close(writer, "thead")?;

    open(writer, "tbody")?;
    for row in &table.rows {
        open(writer, "tr")?;
        for cell in row {
            write_text_element(writer, "td", &[], cell)?;
        }
        close(writer, "tr")?;
    }
    if let Some(message) = table.omitted_message() {
        let colspan = table.column_count().to_string();
        write_full_width_row(
            writer,
            &colspan,
            Some("text-center text-muted"),
            &message,
        )?;
    }
    close(writer, "tbody")
}

fn write_full_width_row(
    writer: &mut HtmlWriter,
    colspan: &str,
    class: Option<&str>,
    text: &str,
) -> Result<()> {
    open(writer, "tr")?;
    match class {
        Some(class) => {
            write_text_element(writer, "td", &[("colspan", colspan), ("class", class)], text)?
        }
        None => write_text_element(writer, "td", &[("colspan", colspan)], text)?,
    }
    close(writer, "tr")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ResultsRenderer;

    #[test]
    fn empty_view_renders_placeholder_row() {
        let html = TableView::Empty.to_html().unwrap();
        insta::assert_snapshot!(
            html,
            @r#"<tbody><tr><td colspan="100%">No data to display</td></tr></tbody>"#
        );
    }

    #[test]
    fn small_table_renders_header_and_rows() {
        let view = ResultsRenderer::default().render_table(Some("name,city\nAna,Lyon\nBo"));
        insta::assert_snapshot!(
            view.to_html().unwrap(),
            @"<thead><tr><th>name</th><th>city</th></tr></thead><tbody><tr><td>Ana</td><td>Lyon</td></tr><tr><td>Bo</td><td></td></tr></tbody>"
        );
    }

    #[test]
    fn script_in_header_and_cell_is_escaped() {
        let view = ResultsRenderer::default()
            .render_table(Some("<script>alert(1)</script>,b\n<img src=x onerror=y>,&"));
        let html = view.to_html().unwrap();
        assert!(!html.contains("<script"));
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;script"));
        assert!(html.contains("&lt;img"));
        assert!(html.contains("<td>&amp;</td>"));
    }

    #[test]
    fn summary_row_spans_all_columns() {
        let mut text = String::from("a,b,c\n");
        for idx in 0..150 {
            text.push_str(&format!("{idx},x,y\n"));
        }
        let html = ResultsRenderer::default()
            .render_table(Some(&text))
            .to_html()
            .unwrap();
        assert_eq!(html.matches("<tr>").count(), 1 + 100 + 1);
        assert!(html.contains(
            r#"<td colspan="3" class="text-center text-muted">50 more rows (download the full file)</td>"#
        ));
    }
}
