//! Session completeness over normalized artifacts.

use std::fs;
use std::path::Path;

use landscape_model::{ARTIFACT_SUFFIX, REQUIRED_ARTIFACTS};
use tracing::debug;

use crate::error::{Result, SessionError};

/// Sorted names of the normalized artifacts in `dir`.
pub fn list_artifacts(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| SessionError::io("list", dir, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SessionError::io("list", dir, e))?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if name.ends_with(ARTIFACT_SUFFIX) && entry.path().is_file() {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Required artifacts absent from `dir`, in required-set order.
///
/// A directory that cannot be listed is missing everything.
pub fn missing_required(dir: &Path) -> Vec<&'static str> {
    let present = match list_artifacts(dir) {
        Ok(names) => names,
        Err(error) => {
            debug!(%error, "session directory not readable");
            Vec::new()
        }
    };
    REQUIRED_ARTIFACTS
        .into_iter()
        .filter(|required| !present.iter().any(|name| name == required))
        .collect()
}

/// Whether every required artifact exists in `dir`.
pub fn is_complete(dir: &Path) -> bool {
    missing_required(dir).is_empty()
}
