//! Raw table shape shared by the CSV and spreadsheet readers.

use std::collections::HashSet;

use landscape_model::{CellValue, Record};

/// A rectangular table: one header row and data rows of the same width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Builds a table from raw header cells, normalizing names and padding
    /// short rows with empty cells.
    pub fn new(raw_headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let headers = normalize_headers(raw_headers);
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// Header names lower-cased, as used for rule matching.
    pub fn column_keys(&self) -> Vec<String> {
        self.headers.iter().map(|name| name.to_lowercase()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Converts rows into records keyed by the original header spelling.
    pub fn into_records(self) -> Vec<Record> {
        let Table { headers, rows } = self;
        rows.into_iter()
            .map(|row| {
                let mut record = Record::with_capacity(headers.len());
                for (name, value) in headers.iter().zip(row) {
                    record.push(name.clone(), value);
                }
                record
            })
            .collect()
    }
}

pub(crate) fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Blank names become `Unnamed: <index>`; repeated names get `.1`, `.2`, ...
fn normalize_headers(raw_headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut headers = Vec::with_capacity(raw_headers.len());
    for (idx, raw) in raw_headers.iter().enumerate() {
        let mut name = normalize_header(raw);
        if name.is_empty() {
            name = format!("Unnamed: {idx}");
        }
        if seen.contains(&name) {
            let mut suffix = 1usize;
            while seen.contains(&format!("{name}.{suffix}")) {
                suffix += 1;
            }
            name = format!("{name}.{suffix}");
        }
        seen.insert(name.clone());
        headers.push(name);
    }
    headers
}

pub(crate) fn is_blank_row(row: &[CellValue]) -> bool {
    row.iter().all(CellValue::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_row(values: &[&str]) -> Vec<CellValue> {
        values.iter().map(|v| CellValue::text(*v)).collect()
    }

    #[test]
    fn headers_are_disambiguated() {
        let table = Table::new(
            vec![
                "sid".to_string(),
                " ".to_string(),
                "sid".to_string(),
                "Host  Name".to_string(),
                "sid".to_string(),
            ],
            Vec::new(),
        );
        assert_eq!(
            table.headers,
            vec!["sid", "Unnamed: 1", "sid.1", "Host Name", "sid.2"]
        );
    }

    #[test]
    fn short_rows_are_padded() {
        let table = Table::new(
            vec!["SID".to_string(), "Host".to_string(), "Client".to_string()],
            vec![text_row(&["PRD"])],
        );
        let records = table.into_records();
        assert_eq!(records.len(), 1);
        let columns: Vec<&str> = records[0].columns().collect();
        assert_eq!(columns, vec!["SID", "Host", "Client"]);
        assert_eq!(records[0].get("client"), Some(&CellValue::Empty));
    }

    #[test]
    fn column_keys_are_lowercase() {
        let table = Table::new(vec!["Last_Backup".to_string()], Vec::new());
        assert_eq!(table.column_keys(), vec!["last_backup"]);
    }
}
