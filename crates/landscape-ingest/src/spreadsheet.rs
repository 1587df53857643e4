//! Workbook reading (first sheet only).

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::NaiveTime;
use landscape_model::CellValue;
use landscape_model::record::format_number;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::table::{Table, is_blank_row, normalize_cell};

/// Read the first worksheet of a workbook. The first non-blank row is the
/// header; cells keep their native type.
pub fn read_spreadsheet(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path).map_err(|e| spreadsheet_error(path, &e))?;
    let sheet_names = workbook.sheet_names();
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(|e| spreadsheet_error(path, &e))?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_value).collect::<Vec<_>>())
        .filter(|row| !is_blank_row(row));

    let Some(header_row) = rows.next() else {
        return Err(IngestError::EmptyFile {
            path: path.to_path_buf(),
        });
    };
    let headers: Vec<String> = header_row.iter().map(ToString::to_string).collect();
    let data: Vec<Vec<CellValue>> = rows.collect();

    debug!(
        path = %path.display(),
        sheet = sheet_names.first().map(String::as_str).unwrap_or(""),
        columns = headers.len(),
        rows = data.len(),
        "read spreadsheet"
    );
    Ok(Table::new(headers, data))
}

fn spreadsheet_error(path: &Path, error: &calamine::Error) -> IngestError {
    IngestError::Spreadsheet {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(value) => CellValue::text(normalize_cell(value)),
        Data::Float(value) => CellValue::Number(*value),
        Data::Int(value) => CellValue::Number(*value as f64),
        Data::Bool(value) => CellValue::text(if *value { "True" } else { "False" }),
        Data::DateTime(value) => match value.as_datetime() {
            Some(dt) if dt.time() == NaiveTime::MIN => {
                CellValue::text(dt.format("%Y-%m-%d").to_string())
            }
            Some(dt) => CellValue::text(dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => CellValue::text(format_number(value.as_f64())),
        },
        Data::DateTimeIso(value) | Data::DurationIso(value) => {
            CellValue::text(normalize_cell(value))
        }
    }
}
