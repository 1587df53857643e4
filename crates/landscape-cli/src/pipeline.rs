//! Per-file collection pipeline: store, parse, validate, explain, persist.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use landscape_feedback::FeedbackGenerator;
use landscape_ingest::{IngestOptions, parse_with};
use landscape_model::{CollectionReport, FileReport};
use landscape_session::Session;
use landscape_validate::{RuleEngine, default_engine};
use serde::{Deserialize, Serialize};
use tracing::{Level, info, info_span, trace};

use crate::logging::redact_value;

/// Outcome of validating a single upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub session_id: String,
    #[serde(flatten)]
    pub file: FileReport,
}

/// Completeness of a session's required artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletenessReport {
    pub session_id: String,
    pub complete: bool,
    pub missing: Vec<String>,
}

impl CompletenessReport {
    pub fn for_session(session: &Session) -> Self {
        let missing: Vec<String> = session
            .missing_required()
            .into_iter()
            .map(str::to_string)
            .collect();
        Self {
            session_id: session.id().to_string(),
            complete: missing.is_empty(),
            missing,
        }
    }
}

/// Runs uploads through the intake pipeline into session directories.
pub struct Collector {
    data_dir: PathBuf,
    ingest: IngestOptions,
    engine: &'static RuleEngine,
    feedback: FeedbackGenerator,
}

impl Collector {
    pub fn new(data_dir: impl Into<PathBuf>, feedback: FeedbackGenerator) -> Self {
        Self {
            data_dir: data_dir.into(),
            ingest: IngestOptions::default(),
            engine: default_engine(),
            feedback,
        }
    }

    #[must_use]
    pub fn with_ingest_options(mut self, ingest: IngestOptions) -> Self {
        self.ingest = ingest;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Create the session, or reuse it when `session_id` names an existing one.
    pub fn session(&self, session_id: Option<&str>) -> Result<Session> {
        Session::create(&self.data_dir, session_id)
            .with_context(|| format!("prepare session in {}", self.data_dir.display()))
    }

    /// Store one upload in the session, validate it, and write its artifact.
    ///
    /// A file that cannot be parsed still yields a report (and an empty
    /// artifact); only session I/O failures are errors.
    pub fn process_file(&self, session: &Session, source: &Path) -> Result<FileReport> {
        let stored = session
            .store_upload(source)
            .with_context(|| format!("store upload {}", source.display()))?;
        let filename = stored
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let span = info_span!("file", session = %session.id(), file = %filename);
        let _guard = span.enter();

        let result = parse_with(&stored, &self.ingest, self.engine);
        if tracing::enabled!(Level::TRACE)
            && let Some(first) = result.records().first()
        {
            let preview = serde_json::to_string(first).unwrap_or_default();
            trace!(first_record = %redact_value(&preview), "parsed sample");
        }

        let feedback = self.feedback.generate(result.records(), result.issues());
        session
            .write_artifact(&filename, &result)
            .with_context(|| format!("write artifact for {filename}"))?;
        info!(
            valid = result.is_valid(),
            records = result.records().len(),
            issues = result.issues().len(),
            "file collected"
        );

        Ok(FileReport {
            filename,
            valid: result.is_valid(),
            issues: result.issue_messages(),
            feedback,
        })
    }

    /// Process every file into one session and report completeness.
    ///
    /// Later uploads with the same filename replace earlier ones.
    pub fn collect(&self, session_id: Option<&str>, files: &[PathBuf]) -> Result<CollectionReport> {
        let session = self.session(session_id)?;
        let span = info_span!("collect", session = %session.id(), files = files.len());
        let _guard = span.enter();

        let mut results = BTreeMap::new();
        for source in files {
            let report = self.process_file(&session, source)?;
            results.insert(report.filename.clone(), report);
        }
        let all_required_present = session.is_complete();
        info!(all_required_present, "collection finished");

        Ok(CollectionReport {
            session_id: session.id().to_string(),
            results,
            all_required_present,
        })
    }

    /// Validate a single upload into a session.
    pub fn validate(&self, session_id: Option<&str>, file: &Path) -> Result<ValidationOutcome> {
        let session = self.session(session_id)?;
        let report = self.process_file(&session, file)?;
        Ok(ValidationOutcome {
            session_id: session.id().to_string(),
            file: report,
        })
    }
}
