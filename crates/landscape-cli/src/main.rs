//! Landscape intake CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use landscape_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, OutputArg};
use crate::commands::{run_check, run_collect, run_overview, run_status, run_validate};
use crate::summary::{
    kind_rows, print_collection, print_completeness, print_json, print_kinds, print_overview,
    print_status, print_validation,
};

/// Everything ran and every file/session passed.
const EXIT_OK: i32 = 0;
/// Ran to completion, but a file is invalid or a session is incomplete.
const EXIT_FINDINGS: i32 = 1;
/// The command itself failed.
const EXIT_ERROR: i32 = 2;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(EXIT_ERROR);
    }
    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            tracing::error!(error = %format!("{error:#}"), "command failed");
            eprintln!("error: {error:#}");
            EXIT_ERROR
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<i32> {
    let json = cli.output == OutputArg::Json;
    match &cli.command {
        Command::Collect(args) => {
            let report = run_collect(&cli.data_dir, args)?;
            render(json, &report, print_collection)?;
            Ok(if report.has_invalid() { EXIT_FINDINGS } else { EXIT_OK })
        }
        Command::Validate(args) => {
            let outcome = run_validate(&cli.data_dir, args)?;
            render(json, &outcome, print_validation)?;
            Ok(if outcome.file.valid { EXIT_OK } else { EXIT_FINDINGS })
        }
        Command::Status(args) => {
            let status = run_status(&cli.data_dir, &args.session)?;
            render(json, &status, print_status)?;
            Ok(EXIT_OK)
        }
        Command::Overview(args) => {
            let overview = run_overview(&cli.data_dir, &args.session)?;
            render(json, &overview, print_overview)?;
            Ok(EXIT_OK)
        }
        Command::Check(args) => {
            let report = run_check(&cli.data_dir, &args.session)?;
            render(json, &report, print_completeness)?;
            Ok(if report.complete { EXIT_OK } else { EXIT_FINDINGS })
        }
        Command::Kinds => {
            let rows = kind_rows();
            if json {
                print_json(&rows)?;
            } else {
                print_kinds(&rows);
            }
            Ok(EXIT_OK)
        }
    }
}

fn render<T: serde::Serialize>(json: bool, value: &T, pretty: fn(&T)) -> Result<()> {
    if json {
        print_json(value)
    } else {
        pretty(value);
        Ok(())
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
