use csv::{QuoteStyle, WriterBuilder};

use super::ExportError;

/// One CSV cell; `None` renders as an empty string.
pub type Cell = Option<String>;

/// Render a header row plus one quote-always row per record.
///
/// The caller supplies a fully-materialized result set that was fetched with
/// the same scope and fiscal-year predicates as the matching list endpoint,
/// so a table and its export always agree on the visible rows.
pub fn render_csv(headers: &[&str], rows: &[Vec<Cell>]) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Render(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_plus_one_line_per_row() {
        let rows = vec![
            vec![Some("RCPT-1".to_string()), Some("500".to_string())],
            vec![Some("RCPT-2".to_string()), Some("1200.50".to_string())],
        ];
        let csv = render_csv(&["Receipt Number", "Amount"], &rows).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), rows.len() + 1);
        assert_eq!(lines[0], "\"Receipt Number\",\"Amount\"");
        assert_eq!(lines[1], "\"RCPT-1\",\"500\"");
    }

    #[test]
    fn null_values_render_as_empty_strings() {
        let rows = vec![vec![Some("RCPT-1".to_string()), None, Some("Cash".to_string())]];
        let csv = render_csv(&["Receipt", "Remarks", "Mode"], &rows).unwrap();
        assert!(csv.lines().nth(1).unwrap().contains("\"RCPT-1\",\"\",\"Cash\""));
    }

    #[test]
    fn embedded_quotes_and_commas_are_escaped() {
        let rows = vec![vec![Some("said \"thanks\", twice".to_string())]];
        let csv = render_csv(&["Remarks"], &rows).unwrap();
        assert_eq!(csv.lines().nth(1).unwrap(), "\"said \"\"thanks\"\", twice\"");
    }

    #[test]
    fn empty_result_set_is_header_only() {
        let csv = render_csv(&["A", "B"], &[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
