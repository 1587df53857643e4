use landscape_model::{Issue, Record};

use crate::columns::ColumnSet;
use crate::engine::Rule;

const IDENTITY_COLUMNS: &[&str] = &["sid", "system"];

/// Every row must name the system it describes, through either the SID or
/// the system column.
pub struct IdentityRule;

impl Rule for IdentityRule {
    fn name(&self) -> &'static str {
        "identity_presence"
    }

    fn applies_to(&self, columns: &ColumnSet) -> bool {
        columns.contains_any(IDENTITY_COLUMNS)
    }

    fn evaluate(&self, records: &[Record]) -> Vec<Issue> {
        records
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                IDENTITY_COLUMNS
                    .iter()
                    .all(|column| record.is_blank(column))
            })
            .map(|(idx, _)| Issue::MissingIdentity { row: idx + 1 })
            .collect()
    }
}
