use std::fmt::Display;
use std::panic::{AssertUnwindSafe, catch_unwind};

use landscape_model::Record;
use tracing::{debug, warn};

use crate::backend::{BackendPhase, BackendSlot};
use crate::fallback::fallback_feedback;
use crate::prompt::{DEFAULT_PREVIEW_ROWS, build_prompt};

/// Default maximum length of generated feedback, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 256;

#[derive(Debug, Clone, Copy)]
pub struct FeedbackOptions {
    pub max_length: usize,
    pub preview_rows: usize,
}

impl Default for FeedbackOptions {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

/// Produces feedback text for a parsed file.
///
/// Asks the backend first when one is configured. Any backend failure, a
/// panic included, or an empty answer yields the templated text instead.
#[derive(Debug, Default)]
pub struct FeedbackGenerator {
    slot: Option<BackendSlot>,
    options: FeedbackOptions,
}

impl FeedbackGenerator {
    /// A generator that only uses templated feedback.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(slot: BackendSlot) -> Self {
        Self {
            slot: Some(slot),
            options: FeedbackOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: FeedbackOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> FeedbackOptions {
        self.options
    }

    /// Lifecycle of the configured backend, if any.
    pub fn backend_phase(&self) -> Option<BackendPhase> {
        self.slot.as_ref().map(BackendSlot::phase)
    }

    pub fn generate<D: Display>(&self, records: &[Record], issues: &[D]) -> String {
        let messages: Vec<String> = issues.iter().map(ToString::to_string).collect();
        self.generated(records, &messages)
            .unwrap_or_else(|| fallback_feedback(&messages))
    }

    fn generated(&self, records: &[Record], messages: &[String]) -> Option<String> {
        let backend = self.slot.as_ref()?.backend()?;
        let prompt = build_prompt(records, messages, self.options.preview_rows);
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            backend.generate(&prompt, self.options.max_length)
        }));
        match outcome {
            Ok(Ok(Some(text))) if !text.trim().is_empty() => Some(text),
            Ok(Ok(_)) => {
                debug!(backend = backend.name(), "backend returned no text");
                None
            }
            Ok(Err(error)) => {
                warn!(%error, backend = backend.name(), "text generation failed, using templated feedback");
                None
            }
            Err(_) => {
                warn!(backend = backend.name(), "text backend panicked, using templated feedback");
                None
            }
        }
    }
}
