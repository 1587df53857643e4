//! Validation issue types.
//!
//! Each variant carries only the data its message needs. Collaborators see
//! issues as plain strings, so [`Issue`] serializes through its `Display`
//! text.

use std::fmt;

use serde::{Serialize, Serializer};

/// One validation problem found in an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    /// The file could not be read as a table at all.
    ParseError { details: String },
    /// Neither the SID nor the system column has a value.
    MissingIdentity { row: usize },
    /// The last backup column is empty.
    MissingBackupDate { row: usize },
    /// The last backup column holds something that is not a date.
    InvalidBackupDate { row: usize, value: String },
    /// Rows carrying a failure marker in any cell.
    JobFailures { rows: usize },
}

impl Issue {
    /// Short stable identifier for the issue type.
    pub fn code(&self) -> &'static str {
        match self {
            Issue::ParseError { .. } => "parse_error",
            Issue::MissingIdentity { .. } => "missing_identity",
            Issue::MissingBackupDate { .. } => "missing_backup_date",
            Issue::InvalidBackupDate { .. } => "invalid_backup_date",
            Issue::JobFailures { .. } => "job_failures",
        }
    }

    /// 1-based data row the issue points at, if it is row-level.
    pub fn row(&self) -> Option<usize> {
        match self {
            Issue::MissingIdentity { row }
            | Issue::MissingBackupDate { row }
            | Issue::InvalidBackupDate { row, .. } => Some(*row),
            Issue::ParseError { .. } | Issue::JobFailures { .. } => None,
        }
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, Issue::ParseError { .. })
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::ParseError { details } => write!(f, "Parse error: {details}"),
            Issue::MissingIdentity { row } => write!(f, "Row {row}: missing SID/system field"),
            Issue::MissingBackupDate { row } => write!(f, "Row {row}: missing last_backup"),
            Issue::InvalidBackupDate { row, value } => {
                write!(f, "Row {row}: invalid date format in last_backup: {value}")
            }
            Issue::JobFailures { rows } => write!(f, "{rows} rows indicate job failure status."),
        }
    }
}

impl Serialize for Issue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
