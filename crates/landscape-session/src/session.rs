use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use landscape_model::{
    DatasetKind, ParseResult, Record, SessionOverview, SessionStatus, artifact_name,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::completeness::{is_complete, list_artifacts, missing_required};
use crate::error::{Result, SessionError};

/// Data directory used when none is configured.
pub const DEFAULT_DATA_DIR: &str = "/tmp/collected_data";

/// A session directory under a data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: String,
    dir: PathBuf,
}

impl Session {
    /// Create (or reuse) a session. Without an id a fresh UUID is used.
    pub fn create(data_dir: &Path, id: Option<&str>) -> Result<Self> {
        let id = match id {
            Some(id) if validate_component(id) => id.to_string(),
            Some(id) => return Err(SessionError::InvalidSessionId { id: id.to_string() }),
            None => Uuid::new_v4().to_string(),
        };
        let dir = data_dir.join(&id);
        fs::create_dir_all(&dir).map_err(|e| SessionError::io("create directory", &dir, e))?;
        debug!(session = %id, dir = %dir.display(), "session ready");
        Ok(Self { id, dir })
    }

    /// Open an existing session.
    pub fn open(data_dir: &Path, id: &str) -> Result<Self> {
        if !validate_component(id) {
            return Err(SessionError::InvalidSessionId { id: id.to_string() });
        }
        let dir = data_dir.join(id);
        if !dir.is_dir() {
            return Err(SessionError::SessionNotFound {
                id: id.to_string(),
                path: dir,
            });
        }
        Ok(Self {
            id: id.to_string(),
            dir,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copy an upload into the session under its own filename.
    ///
    /// A source without a usable filename is stored as `upload_<uuid>.dat`.
    pub fn store_upload(&self, source: &Path) -> Result<PathBuf> {
        let filename = match source.file_name().and_then(|name| name.to_str()) {
            Some(name) => name.to_string(),
            None => format!("upload_{}.dat", Uuid::new_v4()),
        };
        let dest = self.dir.join(&filename);

        if same_file(source, &dest) {
            return Ok(dest);
        }
        let bytes = fs::copy(source, &dest).map_err(|e| SessionError::io("copy", source, e))?;
        debug!(session = %self.id, file = %filename, bytes, "upload stored");
        Ok(dest)
    }

    /// Path of the artifact for an uploaded filename.
    pub fn artifact_path(&self, filename: &str) -> Result<PathBuf> {
        if !validate_component(filename) {
            return Err(SessionError::InvalidFilename {
                name: filename.to_string(),
            });
        }
        Ok(self.dir.join(artifact_name(filename)))
    }

    /// Write the records of `result` as `<filename>.normalized.json`.
    ///
    /// The JSON is written to a temporary file first and renamed into place.
    pub fn write_artifact(&self, filename: &str, result: &ParseResult) -> Result<PathBuf> {
        let path = self.artifact_path(filename)?;
        let temp_path = path.with_extension("json.tmp");

        let written = write_json(&temp_path, result.records()).and_then(|()| {
            fs::rename(&temp_path, &path).map_err(|e| SessionError::io("rename", &path, e))
        });
        if let Err(error) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(error);
        }
        info!(
            session = %self.id,
            artifact = %path.display(),
            records = result.records().len(),
            "artifact written"
        );
        Ok(path)
    }

    /// Records stored in the artifact for an uploaded filename.
    pub fn read_artifact(&self, filename: &str) -> Result<Vec<Record>> {
        let path = self.artifact_path(filename)?;
        let file = File::open(&path).map_err(|e| SessionError::io("open", &path, e))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|source| SessionError::Deserialization { path, source })
    }

    pub fn artifact_names(&self) -> Result<Vec<String>> {
        list_artifacts(&self.dir)
    }

    pub fn is_complete(&self) -> bool {
        is_complete(&self.dir)
    }

    pub fn missing_required(&self) -> Vec<&'static str> {
        missing_required(&self.dir)
    }

    pub fn status(&self) -> Result<SessionStatus> {
        Ok(SessionStatus {
            session_id: self.id.clone(),
            files: self.artifact_names()?,
        })
    }

    /// Inventoried systems plus the collected artifact names.
    pub fn overview(&self) -> Result<SessionOverview> {
        let inventory = DatasetKind::SystemInventory.upload_name();
        let systems = if self.artifact_path(inventory)?.is_file() {
            self.read_artifact(inventory)?
        } else {
            Vec::new()
        };
        Ok(SessionOverview {
            session_id: self.id.clone(),
            systems,
            collection_files: self.artifact_names()?,
        })
    }
}

fn write_json(path: &Path, records: &[Record]) -> Result<()> {
    let file = File::create(path).map_err(|e| SessionError::io("create", path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records).map_err(|source| {
        SessionError::Serialization {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer
        .flush()
        .map_err(|e| SessionError::io("write", path, e))
}

/// A single, non-empty path component.
fn validate_component(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains('\0')
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_uuids() {
        let data_dir = tempfile::tempdir().expect("tempdir");
        let session = Session::create(data_dir.path(), None).expect("create session");
        assert!(Uuid::parse_str(session.id()).is_ok());
        assert!(session.dir().is_dir());
    }

    #[test]
    fn create_reuses_existing_session() {
        let data_dir = tempfile::tempdir().expect("tempdir");
        let first = Session::create(data_dir.path(), Some("audit-1")).expect("create");
        let second = Session::create(data_dir.path(), Some("audit-1")).expect("create again");
        assert_eq!(first, second);
    }

    #[test]
    fn path_like_ids_are_rejected() {
        let data_dir = tempfile::tempdir().expect("tempdir");
        for id in ["", ".", "..", "../escape", "a/b"] {
            let err = Session::create(data_dir.path(), Some(id)).expect_err("invalid id");
            assert!(matches!(err, SessionError::InvalidSessionId { .. }));
        }
    }

    #[test]
    fn open_unknown_session() {
        let data_dir = tempfile::tempdir().expect("tempdir");
        let err = Session::open(data_dir.path(), "missing").expect_err("unknown session");
        assert!(matches!(err, SessionError::SessionNotFound { .. }));
        assert_eq!(err.to_string(), "unknown session missing");
    }

    #[test]
    fn storing_an_upload_in_place_keeps_it() {
        let data_dir = tempfile::tempdir().expect("tempdir");
        let session = Session::create(data_dir.path(), Some("s1")).expect("create");
        let path = session.dir().join("jobs.csv");
        fs::write(&path, b"job,status\n").expect("write upload");
        let stored = session.store_upload(&path).expect("store");
        assert_eq!(fs::read(stored).expect("read"), b"job,status\n");
    }

    #[test]
    fn failed_artifact_write_leaves_no_temp_file() {
        let data_dir = tempfile::tempdir().expect("tempdir");
        let session = Session::create(data_dir.path(), Some("s1")).expect("create");
        let blocked = session.dir().join("jobs.csv.normalized.json");
        fs::create_dir(&blocked).expect("create blocking dir");
        fs::write(blocked.join("keep"), b"x").expect("write into blocking dir");

        let result = ParseResult::new(Vec::new(), Vec::new());
        let err = session
            .write_artifact("jobs.csv", &result)
            .expect_err("rename onto a directory");
        assert!(matches!(err, SessionError::Io { .. }));
        assert!(!session.dir().join("jobs.csv.normalized.json.tmp").exists());
    }
}
