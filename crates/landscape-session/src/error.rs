//! Session error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unknown session {id}")]
    SessionNotFound { id: String, path: PathBuf },

    #[error("invalid session id {id:?}")]
    InvalidSessionId { id: String },

    #[error("invalid upload name {name:?}")]
    InvalidFilename { name: String },

    #[error("failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize artifact {path}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read artifact {path}")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl SessionError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
