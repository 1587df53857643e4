//! Dataset kinds and normalized artifact naming.

use serde::{Deserialize, Serialize};

/// Suffix appended to an uploaded filename to name its normalized artifact.
pub const ARTIFACT_SUFFIX: &str = ".normalized.json";

/// Artifacts that must all exist for a session to be complete.
pub const REQUIRED_ARTIFACTS: [&str; 3] = [
    "system_inventory.csv.normalized.json",
    "db_backups.csv.normalized.json",
    "jobs.csv.normalized.json",
];

/// Name of the normalized artifact written for `filename`.
pub fn artifact_name(filename: &str) -> String {
    format!("{filename}{ARTIFACT_SUFFIX}")
}

/// Kinds of landscape exports the intake knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    SystemInventory,
    Backups,
    Jobs,
    RfcDestinations,
    LandscapeDirectory,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 5] = [
        DatasetKind::SystemInventory,
        DatasetKind::Backups,
        DatasetKind::Jobs,
        DatasetKind::RfcDestinations,
        DatasetKind::LandscapeDirectory,
    ];

    /// Canonical filename of the export.
    pub fn upload_name(self) -> &'static str {
        match self {
            DatasetKind::SystemInventory => "system_inventory.csv",
            DatasetKind::Backups => "db_backups.csv",
            DatasetKind::Jobs => "jobs.csv",
            DatasetKind::RfcDestinations => "rfc_dest.csv",
            DatasetKind::LandscapeDirectory => "sld_lmdb.csv",
        }
    }

    pub fn artifact_name(self) -> String {
        artifact_name(self.upload_name())
    }

    pub fn label(self) -> &'static str {
        match self {
            DatasetKind::SystemInventory => "System inventory",
            DatasetKind::Backups => "Database backups",
            DatasetKind::Jobs => "Background job log",
            DatasetKind::RfcDestinations => "RFC destinations",
            DatasetKind::LandscapeDirectory => "SLD/LMDB landscape directory",
        }
    }

    /// Whether this kind belongs to the completeness set.
    pub fn is_required(self) -> bool {
        REQUIRED_ARTIFACTS.contains(&self.artifact_name().as_str())
    }

    /// Matches an uploaded filename against the canonical names, ignoring case.
    pub fn from_upload_name(filename: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.upload_name().eq_ignore_ascii_case(filename))
    }
}
