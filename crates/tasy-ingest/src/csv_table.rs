use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::IngestError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A fully loaded source table.
///
/// Cells keep their raw text; an empty string is a missing value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Builds a table, padding or truncating rows to the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// Index of the first header equal to `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Cell text, or `None` when the cell is empty or out of range.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Decodes a field as UTF-8, falling back to Latin-1 for legacy exports.
fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&byte| char::from(byte)).collect(),
    }
}

/// Picks `;` or `,` from the first non-blank line.
///
/// Spreadsheet exports that use the comma as decimal separator write `;`
/// between fields. Separators inside double quotes are not counted.
pub fn sniff_delimiter(data: &[u8]) -> u8 {
    let line = data
        .split(|&byte| byte == b'\n')
        .find(|line| line.iter().any(|byte| !byte.is_ascii_whitespace()))
        .unwrap_or(&[]);
    let mut in_quotes = false;
    let mut commas = 0usize;
    let mut semicolons = 0usize;
    for &byte in line {
        match byte {
            b'"' => in_quotes = !in_quotes,
            b',' if !in_quotes => commas += 1,
            b';' if !in_quotes => semicolons += 1,
            _ => {}
        }
    }
    if semicolons > commas { b';' } else { b',' }
}

/// Reads a whole table into memory and releases the file.
pub fn read_csv_table(path: &Path) -> Result<CsvTable, IngestError> {
    let data = std::fs::read(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv_table_from_reader(&data, path)
}

/// Parses table bytes; `origin` is only used in error messages.
pub fn read_csv_table_from_reader(data: &[u8], origin: &Path) -> Result<CsvTable, IngestError> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let delimiter = sniff_delimiter(data);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(data);
    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(|source| IngestError::Csv {
            path: origin.to_path_buf(),
            source,
        })?;
        let row: Vec<String> = record.iter().map(decode_field).collect();
        if row.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        match headers {
            None => headers = Some(row.iter().map(|value| normalize_header(value)).collect()),
            Some(_) => rows.push(row),
        }
    }
    let table = CsvTable::new(headers.unwrap_or_default(), rows);
    debug!(
        source = %origin.display(),
        delimiter = %char::from(delimiter),
        columns = table.headers.len(),
        rows = table.row_count(),
        "table loaded"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_semicolon_exports() {
        assert_eq!(sniff_delimiter(b"nome;hb;glicose\nana;12,5;90\n"), b';');
        assert_eq!(sniff_delimiter(b"nome,hb\nana,12.5\n"), b',');
        assert_eq!(sniff_delimiter(b"\"a;b\",c\n"), b',');
        assert_eq!(sniff_delimiter(b""), b',');
    }

    #[test]
    fn decodes_latin1_fallback() {
        assert_eq!(decode_field("João".as_bytes()), "João");
        assert_eq!(decode_field(&[0x4A, 0x6F, 0xE3, 0x6F]), "João");
    }

    #[test]
    fn cell_treats_empty_as_missing() {
        let table = CsvTable::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec!["1".to_string()]],
        );
        assert_eq!(table.cell(0, 0), Some("1"));
        assert_eq!(table.cell(0, 1), None);
        assert_eq!(table.cell(5, 0), None);
    }
}
