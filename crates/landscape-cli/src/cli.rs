//! CLI argument definitions for the landscape intake.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use landscape_feedback::DEFAULT_MAX_LENGTH;
use landscape_session::DEFAULT_DATA_DIR;

#[derive(Parser)]
#[command(
    name = "landscape",
    version,
    about = "Landscape intake - validate SAP landscape exports and explain what to fix",
    long_about = "Validate SAP landscape exports (system inventory, backup logs, job logs, \
                  RFC destinations) and produce remediation feedback.\n\n\
                  Uploads are stored per session together with a normalized JSON artifact. \
                  A session is complete once the inventory, backup and job exports are present."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values from uploaded files to appear in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Directory holding one subdirectory per session.
    #[arg(
        long = "data-dir",
        env = "LANDSCAPE_DATA_DIR",
        value_name = "DIR",
        default_value = DEFAULT_DATA_DIR,
        global = true
    )]
    pub data_dir: PathBuf,

    /// Result format on stdout.
    #[arg(long = "output", value_enum, default_value = "pretty", global = true)]
    pub output: OutputArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Collect exports into a session, validating each and writing artifacts.
    Collect(CollectArgs),

    /// Validate a single export into a session.
    Validate(ValidateArgs),

    /// List the normalized artifacts of a session.
    Status(SessionArgs),

    /// Show the inventoried systems and collected artifacts of a session.
    Overview(SessionArgs),

    /// Check whether a session holds every required artifact.
    Check(SessionArgs),

    /// List the known dataset kinds.
    Kinds,
}

#[derive(Args)]
pub struct CollectArgs {
    /// Export files to collect.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Add to this session instead of starting a new one.
    #[arg(long = "session", value_name = "ID")]
    pub session: Option<String>,

    #[command(flatten)]
    pub model: ModelArgs,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Export file to validate.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Add to this session instead of starting a new one.
    #[arg(long = "session", value_name = "ID")]
    pub session: Option<String>,

    #[command(flatten)]
    pub model: ModelArgs,
}

#[derive(Args)]
pub struct SessionArgs {
    #[arg(value_name = "SESSION")]
    pub session: String,
}

/// Optional text-generation backend for feedback.
#[derive(Args)]
pub struct ModelArgs {
    /// Command that reads a prompt on stdin and prints feedback on stdout.
    #[arg(long = "model-command", env = "LANDSCAPE_MODEL_COMMAND", value_name = "PROGRAM")]
    pub model_command: Option<PathBuf>,

    /// Extra argument for the model command (repeatable).
    #[arg(long = "model-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub model_args: Vec<String>,

    /// Directory with model files; the backend is skipped when it is missing.
    #[arg(long = "model-dir", env = "LANDSCAPE_MODEL_DIR", value_name = "DIR")]
    pub model_dir: Option<PathBuf>,

    /// Maximum length of generated feedback, in characters.
    #[arg(long = "max-length", value_name = "CHARS", default_value_t = DEFAULT_MAX_LENGTH)]
    pub max_length: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    Pretty,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn collect_accepts_many_files() {
        let cli = Cli::try_parse_from([
            "landscape",
            "collect",
            "system_inventory.csv",
            "jobs.xlsx",
            "--session",
            "audit-7",
            "--max-length",
            "128",
            "--data-dir",
            "/srv/intake",
            "--output",
            "json",
        ])
        .expect("parse collect");
        assert_eq!(cli.data_dir, PathBuf::from("/srv/intake"));
        assert!(cli.output == OutputArg::Json);
        let Command::Collect(args) = cli.command else {
            panic!("expected collect");
        };
        assert_eq!(args.files.len(), 2);
        assert_eq!(args.session.as_deref(), Some("audit-7"));
        assert_eq!(args.model.max_length, 128);
    }

    #[test]
    fn collect_requires_files() {
        assert!(Cli::try_parse_from(["landscape", "collect"]).is_err());
    }

    #[test]
    fn model_args_may_look_like_flags() {
        let cli = Cli::try_parse_from([
            "landscape",
            "validate",
            "jobs.csv",
            "--model-command",
            "/opt/model/generate",
            "--model-arg",
            "--temperature=0",
        ])
        .expect("parse validate");
        let Command::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.model.model_args, vec!["--temperature=0"]);
        assert_eq!(args.model.max_length, DEFAULT_MAX_LENGTH);
    }
}
