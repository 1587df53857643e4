//! Standard landscape rules.
//!
//! Row numbers in issues are 1-based data rows: the first row after the
//! header is row 1.

mod backup_date;
mod identity;
mod job_status;

pub use backup_date::BackupDateRule;
pub use identity::IdentityRule;
pub use job_status::JobFailureRule;
