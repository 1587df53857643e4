//! Feedback text for validated landscape exports.
//!
//! A [`FeedbackGenerator`] turns a parsed sample and its issues into text an
//! operator can act on. When a text-generation backend is configured it is
//! asked first; otherwise, or when it produces nothing, a fixed template is
//! used, so feedback is always available.

mod backend;
mod command;
mod fallback;
mod generator;
mod prompt;

pub use backend::{BackendError, BackendLoader, BackendPhase, BackendSlot, NullBackend, TextBackend};
pub use command::{CommandBackend, CommandBackendConfig, MAX_LENGTH_ENV, MODEL_DIR_ENV};
pub use fallback::{REMEDIATION_STEPS, SUCCESS_MESSAGE, fallback_feedback};
pub use generator::{DEFAULT_MAX_LENGTH, FeedbackGenerator, FeedbackOptions};
pub use prompt::{DEFAULT_PREVIEW_ROWS, build_prompt};

use std::fmt::Display;

use landscape_model::Record;

/// Feedback without any backend: always the templated text.
pub fn generate_feedback<D: Display>(records: &[Record], issues: &[D]) -> String {
    FeedbackGenerator::new().generate(records, issues)
}
