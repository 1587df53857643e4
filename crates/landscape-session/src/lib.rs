//! Session directories for landscape collection.
//!
//! A session is a directory under the data directory named by its id. It
//! holds the uploaded exports and, next to each, the normalized artifact
//! `<filename>.normalized.json` written after parsing. A session is complete
//! once the artifacts for the system inventory, database backups and job log
//! all exist.

mod completeness;
mod error;
mod session;

pub use completeness::{is_complete, list_artifacts, missing_required};
pub use error::{Result, SessionError};
pub use session::{DEFAULT_DATA_DIR, Session};
