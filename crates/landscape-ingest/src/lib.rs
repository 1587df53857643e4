//! Landscape export ingestion.
//!
//! This crate turns an uploaded export (CSV/TSV text or a workbook) into
//! normalized [`Record`]s and runs the validation rules over them.
//!
//! # Features
//!
//! - **Format dispatch**: `.csv`/`.txt`/`.tsv` are read as delimited text,
//!   everything else as a workbook (first sheet)
//! - **Normalization**: every record carries every header column; missing
//!   cells become empty values
//! - **Total parsing**: [`parse`] never fails; read errors become a single
//!   `Parse error: ...` issue
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use landscape_ingest::parse;
//!
//! let result = parse(Path::new("uploads/db_backups.csv"));
//! if !result.is_valid() {
//!     for issue in result.issues() {
//!         eprintln!("{issue}");
//!     }
//! }
//! ```

mod delimited;
mod error;
mod format;
mod spreadsheet;
mod table;

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;

use landscape_model::{ParseResult, Record};
use landscape_validate::{RuleEngine, default_engine};
use tracing::{info, info_span, warn};

// === Error Types ===
pub use error::{IngestError, Result};

// === Readers ===
pub use delimited::read_delimited;
pub use format::{MAX_FILE_SIZE, SourceFormat, check_file_size};
pub use spreadsheet::read_spreadsheet;
pub use table::Table;

/// Options for reading input files.
#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    /// Files larger than this are rejected before reading.
    pub max_file_size: u64,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

impl IngestOptions {
    #[must_use]
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }
}

/// Read a file into a table, dispatching on its extension.
pub fn read_table(path: &Path, options: &IngestOptions) -> Result<Table> {
    check_file_size(path, options.max_file_size)?;
    match SourceFormat::from_path(path) {
        SourceFormat::Delimited { delimiter } => read_delimited(path, delimiter),
        SourceFormat::Spreadsheet => read_spreadsheet(path),
    }
}

/// Read records without validating them.
pub fn read_records(path: &Path, options: &IngestOptions) -> Result<(Vec<String>, Vec<Record>)> {
    let table = read_table(path, options)?;
    let columns = table.headers.clone();
    Ok((columns, table.into_records()))
}

/// Parse and validate a file with default options and the standard rules.
pub fn parse(path: &Path) -> ParseResult {
    parse_with(path, &IngestOptions::default(), default_engine())
}

/// Parse and validate a file.
///
/// Never fails: any read error, including a panic inside a third-party
/// reader, becomes a result with no records and one parse-error issue.
pub fn parse_with(path: &Path, options: &IngestOptions, engine: &RuleEngine) -> ParseResult {
    let span = info_span!("parse", file = %path.display());
    let _guard = span.enter();

    let read = catch_unwind(AssertUnwindSafe(|| read_table(path, options))).unwrap_or_else(|_| {
        Err(IngestError::ReaderPanic {
            path: path.to_path_buf(),
        })
    });
    let table = match read {
        Ok(table) => table,
        Err(error) => {
            warn!(%error, "file could not be parsed");
            return ParseResult::parse_failure(error.to_string());
        }
    };

    let column_keys = table.column_keys();
    let records = table.into_records();
    let issues = engine.execute(&records, &column_keys);
    info!(
        records = records.len(),
        columns = column_keys.len(),
        issues = issues.len(),
        "file parsed"
    );
    ParseResult::new(records, issues)
}
