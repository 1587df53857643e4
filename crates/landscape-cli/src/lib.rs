//! Library components of the landscape intake CLI.

pub mod logging;
pub mod pipeline;
