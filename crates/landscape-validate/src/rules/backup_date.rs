use landscape_model::{Issue, Record};

use crate::columns::ColumnSet;
use crate::dates::is_calendar_date;
use crate::engine::Rule;

const BACKUP_COLUMN: &str = "last_backup";

/// The last backup date must be filled in and readable as a date.
pub struct BackupDateRule;

impl Rule for BackupDateRule {
    fn name(&self) -> &'static str {
        "backup_date"
    }

    fn applies_to(&self, columns: &ColumnSet) -> bool {
        columns.contains(BACKUP_COLUMN)
    }

    fn evaluate(&self, records: &[Record]) -> Vec<Issue> {
        let mut issues = Vec::new();
        for (idx, record) in records.iter().enumerate() {
            let row = idx + 1;
            let Some(value) = record.get(BACKUP_COLUMN).filter(|value| !value.is_empty()) else {
                issues.push(Issue::MissingBackupDate { row });
                continue;
            };
            // Numbers are checked through their displayed form so a compact
            // 20250730 read as a number still counts as a date.
            let raw = value.to_string();
            if !is_calendar_date(&raw) {
                issues.push(Issue::InvalidBackupDate { row, value: raw });
            }
        }
        issues
    }
}
