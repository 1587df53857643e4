use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Per-file outcome handed back to whoever uploaded the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub filename: String,
    pub valid: bool,
    pub issues: Vec<String>,
    pub feedback: String,
}

/// Outcome of a batch of files collected into one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionReport {
    pub session_id: String,
    pub results: BTreeMap<String, FileReport>,
    pub all_required_present: bool,
}

impl CollectionReport {
    pub fn has_invalid(&self) -> bool {
        self.results.values().any(|report| !report.valid)
    }

    pub fn issue_count(&self) -> usize {
        self.results.values().map(|report| report.issues.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub session_id: String,
    pub files: Vec<String>,
}

/// Landscape view of a session: the inventoried systems plus what has been
/// collected so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOverview {
    pub session_id: String,
    pub systems: Vec<Record>,
    pub collection_files: Vec<String>,
}
