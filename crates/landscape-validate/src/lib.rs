//! Validation rules for landscape exports.
//!
//! Rules are gated on column presence: each one declares which columns it
//! needs and is skipped entirely when they are absent, so a single engine
//! covers inventories, backup logs and job logs without per-kind
//! configuration.
//!
//! # Example
//!
//! ```ignore
//! use landscape_validate::{default_engine, validate};
//!
//! let issues = validate(&records, &["SID", "last_backup"]);
//! for issue in &issues {
//!     println!("{issue}");
//! }
//! ```

mod columns;
pub mod dates;
mod engine;
pub mod rules;

pub use columns::ColumnSet;
pub use dates::parse_calendar_date;
pub use engine::{Rule, RuleEngine, default_engine};

use landscape_model::{Issue, Record};

/// Validate records with the default rule set.
pub fn validate<S: AsRef<str>>(records: &[Record], column_names: &[S]) -> Vec<Issue> {
    default_engine().execute(records, column_names)
}
