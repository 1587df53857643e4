use landscape_model::{Issue, Record};

use crate::columns::ColumnSet;
use crate::engine::Rule;

const STATUS_COLUMN: &str = "status";
const FAILURE_MARKER: &str = "fail";

/// Counts rows that carry a failure marker.
///
/// The rule is triggered by the status column but scans every cell of a row,
/// so failures noted in remark or message columns are counted too. It emits
/// a single aggregate issue rather than one per row.
pub struct JobFailureRule;

impl Rule for JobFailureRule {
    fn name(&self) -> &'static str {
        "job_failure_scan"
    }

    fn applies_to(&self, columns: &ColumnSet) -> bool {
        columns.contains(STATUS_COLUMN)
    }

    fn evaluate(&self, records: &[Record]) -> Vec<Issue> {
        let failures = records.iter().filter(|record| row_has_failure(record)).count();
        if failures == 0 {
            return Vec::new();
        }
        vec![Issue::JobFailures { rows: failures }]
    }
}

fn row_has_failure(record: &Record) -> bool {
    record
        .values()
        .filter_map(|value| value.as_str())
        .any(|text| text.to_lowercase().contains(FAILURE_MARKER))
}
