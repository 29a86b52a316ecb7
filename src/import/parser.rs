/// Tabular file parsing for bulk import
///
/// Two formats are recognized by extension: CSV text files and Excel
/// workbooks. Only the first sheet of a workbook is read. The header
/// row supplies field names; every data row becomes a map from header
/// to cell text. Anything unreadable is a parse error — the caller
/// shows it and waits for a re-upload.

use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Reader};

use crate::error::Error;

/// One data row, keyed by trimmed header name
pub type Row = BTreeMap<String, String>;

/// Parse an uploaded file into header-keyed rows
pub fn parse(file_name: &str, bytes: &[u8]) -> Result<Vec<Row>, Error> {
    let extension = Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => parse_csv(bytes),
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => parse_workbook(bytes),
        "" => Err(Error::Parse(format!(
            "{} has no file extension",
            file_name
        ))),
        other => Err(Error::Parse(format!("unsupported file type: .{}", other))),
    }
}

fn parse_csv(bytes: &[u8]) -> Result<Vec<Row>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        // Hand-edited files often have ragged rows; short rows just
        // leave the trailing fields empty
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| Error::Parse(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::Parse(e.to_string()))?;
        rows.push(zip_row(&headers, record.iter().map(str::to_string)));
    }
    Ok(rows)
}

fn parse_workbook(bytes: &[u8]) -> Result<Vec<Row>, Error> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook =
        open_workbook_auto_from_rs(cursor).map_err(|e| Error::Parse(e.to_string()))?;

    // First sheet only
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::Parse("workbook has no sheets".to_string()))?
        .map_err(|e| Error::Parse(e.to_string()))?;

    let mut sheet_rows = range.rows();
    let Some(header_cells) = sheet_rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_cells
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    let rows = sheet_rows
        .map(|cells| {
            zip_row(
                &headers,
                cells.iter().map(|cell| cell.to_string().trim().to_string()),
            )
        })
        .collect();
    Ok(rows)
}

/// Pair headers with cell values; blank headers are dropped
fn zip_row(headers: &[String], values: impl Iterator<Item = String>) -> Row {
    headers
        .iter()
        .zip(values)
        .filter(|(header, _)| !header.is_empty())
        .map(|(header, value)| (header.clone(), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_rows_keyed_by_header() {
        let rows = parse(
            "albums.csv",
            b"title,userId\nquidem molestiae enim,1\nsunt qui excepturi,2\n",
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["title"], "quidem molestiae enim");
        assert_eq!(rows[0]["userId"], "1");
        assert_eq!(rows[1]["userId"], "2");
    }

    #[test]
    fn test_csv_values_are_trimmed() {
        let rows = parse("u.csv", b"name, email\n Ada , ada@example.com \n").unwrap();
        assert_eq!(rows[0]["name"], "Ada");
        assert_eq!(rows[0]["email"], "ada@example.com");
    }

    #[test]
    fn test_csv_short_row_leaves_fields_absent() {
        let rows = parse("u.csv", b"name,email\nAda\n").unwrap();
        assert_eq!(rows[0]["name"], "Ada");
        assert!(rows[0].get("email").is_none());
    }

    #[test]
    fn test_header_only_file_yields_no_rows() {
        let rows = parse("empty.csv", b"title,userId\n").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_unknown_extension_is_a_parse_error() {
        assert!(matches!(
            parse("report.pdf", b"whatever"),
            Err(Error::Parse(_))
        ));
        assert!(matches!(parse("noext", b"whatever"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_garbage_workbook_is_a_parse_error() {
        assert!(matches!(
            parse("broken.xlsx", b"not a zip archive"),
            Err(Error::Parse(_))
        ));
    }
}
