//! Shared data model for landscape intake.
//!
//! Every crate in the workspace speaks in these types: a [`Record`] is one
//! normalized row, an [`Issue`] is one validation finding, and a
//! [`ParseResult`] bundles both for a single input file.

pub mod dataset;
pub mod issue;
pub mod record;
pub mod report;
pub mod result;

pub use dataset::{ARTIFACT_SUFFIX, DatasetKind, REQUIRED_ARTIFACTS, artifact_name};
pub use issue::Issue;
pub use record::{CellValue, Record};
pub use report::{CollectionReport, FileReport, SessionOverview, SessionStatus};
pub use result::ParseResult;
