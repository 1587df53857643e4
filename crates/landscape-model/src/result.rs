use serde::Serialize;

use crate::issue::Issue;
use crate::record::Record;

/// Outcome of parsing and validating one input file.
///
/// `valid` is derived from the issue list at construction and cannot drift:
/// a result is valid exactly when it carries no issues.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseResult {
    records: Vec<Record>,
    valid: bool,
    issues: Vec<Issue>,
}

impl ParseResult {
    pub fn new(records: Vec<Record>, issues: Vec<Issue>) -> Self {
        Self {
            valid: issues.is_empty(),
            records,
            issues,
        }
    }

    /// Result for a file that could not be parsed: no records, one issue.
    pub fn parse_failure(details: impl Into<String>) -> Self {
        Self::new(
            Vec::new(),
            vec![Issue::ParseError {
                details: details.into(),
            }],
        )
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Issues rendered as display strings, in detection order.
    pub fn issue_messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}
