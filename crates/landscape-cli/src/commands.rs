use std::path::Path;

use anyhow::{Context, Result};
use landscape_feedback::{CommandBackendConfig, FeedbackGenerator, FeedbackOptions};
use landscape_model::{CollectionReport, SessionOverview, SessionStatus};
use landscape_session::Session;
use tracing::{debug, info_span, warn};

use landscape_cli::pipeline::{Collector, CompletenessReport, ValidationOutcome};

use crate::cli::{CollectArgs, ModelArgs, ValidateArgs};

pub fn run_collect(data_dir: &Path, args: &CollectArgs) -> Result<CollectionReport> {
    let span = info_span!("collect_command", files = args.files.len());
    let _guard = span.enter();
    let collector = Collector::new(data_dir, feedback_generator(&args.model));
    collector.collect(args.session.as_deref(), &args.files)
}

pub fn run_validate(data_dir: &Path, args: &ValidateArgs) -> Result<ValidationOutcome> {
    let span = info_span!("validate_command", file = %args.file.display());
    let _guard = span.enter();
    let collector = Collector::new(data_dir, feedback_generator(&args.model));
    collector.validate(args.session.as_deref(), &args.file)
}

pub fn run_status(data_dir: &Path, session_id: &str) -> Result<SessionStatus> {
    let session = open_session(data_dir, session_id)?;
    session.status().context("list session artifacts")
}

pub fn run_overview(data_dir: &Path, session_id: &str) -> Result<SessionOverview> {
    let session = open_session(data_dir, session_id)?;
    session.overview().context("build session overview")
}

pub fn run_check(data_dir: &Path, session_id: &str) -> Result<CompletenessReport> {
    let session = open_session(data_dir, session_id)?;
    Ok(CompletenessReport::for_session(&session))
}

fn open_session(data_dir: &Path, session_id: &str) -> Result<Session> {
    Session::open(data_dir, session_id)
        .with_context(|| format!("open session in {}", data_dir.display()))
}

/// Feedback generator for the model flags; templated only without a command.
fn feedback_generator(model: &ModelArgs) -> FeedbackGenerator {
    let options = FeedbackOptions {
        max_length: model.max_length,
        ..FeedbackOptions::default()
    };
    let Some(program) = &model.model_command else {
        if let Some(dir) = &model.model_dir {
            warn!(
                model_dir = %dir.display(),
                "model directory given without --model-command; using templated feedback"
            );
        }
        return FeedbackGenerator::new().with_options(options);
    };

    let mut config = CommandBackendConfig::new(program).with_args(model.model_args.iter().cloned());
    if let Some(dir) = &model.model_dir {
        config = config.with_model_dir(dir);
    }
    debug!(program = %program.display(), "text backend configured");
    FeedbackGenerator::with_backend(config.into_slot()).with_options(options)
}
