//! Delimited text reading.

use std::path::Path;

use csv::{ErrorKind, ReaderBuilder};
use landscape_model::CellValue;
use landscape_model::record::format_number;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::format::read_text_bytes;
use crate::table::{Table, normalize_cell};

/// Read a delimited text file. The first non-blank line is the header.
pub fn read_delimited(path: &Path, delimiter: u8) -> Result<Table> {
    let bytes = read_text_bytes(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(bytes.as_slice());

    let mut header: Option<Vec<String>> = None;
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(path, &e))?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        let Some(width) = header.as_ref().map(Vec::len) else {
            header = Some(record.iter().map(ToString::to_string).collect());
            continue;
        };
        if row.len() > width {
            return Err(IngestError::RaggedRow {
                path: path.to_path_buf(),
                line: record.position().map_or(0, csv::Position::line),
                expected: width,
                found: row.len(),
            });
        }
        raw_rows.push(row);
    }

    let Some(header) = header else {
        return Err(IngestError::EmptyFile {
            path: path.to_path_buf(),
        });
    };
    let rows = type_columns(raw_rows, header.len());
    debug!(
        path = %path.display(),
        columns = header.len(),
        rows = rows.len(),
        "read delimited file"
    );
    Ok(Table::new(header, rows))
}

fn csv_error(path: &Path, error: &csv::Error) -> IngestError {
    match error.kind() {
        ErrorKind::Utf8 { .. } => IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "non-UTF-8",
        },
        _ => IngestError::CsvParse {
            path: path.to_path_buf(),
            message: error.to_string(),
        },
    }
}

/// Types each column as numeric when all its non-empty cells are plain
/// numbers; otherwise every cell stays text.
///
/// Values with a leading zero (`000`, `0042`) keep the column textual, since
/// client numbers and job ids lose meaning as numbers. So do values a number
/// cannot reproduce exactly: an explicit `+`, or more significant digits than
/// an `f64` holds.
fn type_columns(raw_rows: Vec<Vec<String>>, width: usize) -> Vec<Vec<CellValue>> {
    let numeric: Vec<bool> = (0..width)
        .map(|idx| {
            let mut non_empty = 0usize;
            let all_numeric = raw_rows.iter().all(|row| {
                let value = row.get(idx).map(String::as_str).unwrap_or("");
                if value.is_empty() {
                    return true;
                }
                non_empty += 1;
                parse_number(value).is_some()
            });
            all_numeric && non_empty > 0
        })
        .collect();

    raw_rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .enumerate()
                .map(|(idx, value)| match parse_number(&value) {
                    Some(number) if numeric[idx] => CellValue::Number(number),
                    _ => CellValue::text(value),
                })
                .collect()
        })
        .collect()
}

/// Digits an `f64` reproduces exactly.
const MAX_SIGNIFICANT_DIGITS: usize = 15;

fn parse_number(value: &str) -> Option<f64> {
    if value.starts_with('+') {
        return None;
    }
    let digits = value.trim_start_matches('-');
    if digits.len() > 1 && digits.starts_with('0') && !digits.starts_with("0.") {
        return None;
    }
    if significant_digits(digits) > MAX_SIGNIFICANT_DIGITS {
        return None;
    }
    let number = value.parse::<f64>().ok().filter(|number| number.is_finite())?;
    if !value.contains(['.', 'e', 'E']) && format_number(number) != value {
        return None;
    }
    Some(number)
}

fn significant_digits(value: &str) -> usize {
    let mantissa = value.split(['e', 'E']).next().unwrap_or(value);
    mantissa
        .chars()
        .filter(char::is_ascii_digit)
        .skip_while(|digit| *digit == '0')
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_detection() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("-1.5"), Some(-1.5));
        assert_eq!(parse_number("0"), Some(0.0));
        assert_eq!(parse_number("0.25"), Some(0.25));
        assert_eq!(parse_number("000"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("PRD"), None);
    }

    #[test]
    fn inexact_numbers_stay_text() {
        assert_eq!(parse_number("1234567890123456789"), None);
        assert_eq!(parse_number("9007199254740993"), None);
        assert_eq!(parse_number("0.1234567890123456"), None);
        assert_eq!(parse_number("+5"), None);
        assert_eq!(parse_number("-0"), None);
        assert_eq!(parse_number("999999999999999"), Some(999_999_999_999_999.0));
        assert_eq!(parse_number("-12.75"), Some(-12.75));
    }

    #[test]
    fn mixed_columns_stay_text() {
        let rows = vec![
            vec!["1".to_string(), "100".to_string()],
            vec!["x".to_string(), String::new()],
        ];
        let typed = type_columns(rows, 2);
        assert_eq!(typed[0][0], CellValue::Text("1".into()));
        assert_eq!(typed[0][1], CellValue::Number(100.0));
        assert_eq!(typed[1][1], CellValue::Empty);
    }
}
