//! Hiring warehouse ETL CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use hiring_cli::commands::{run_kpi_report, run_load, run_schema, run_transform};
use hiring_cli::config::{FileConfig, Settings};
use hiring_cli::logging::{LogConfig, LogFormat, init_logging};
use hiring_cli::summary::{print_etl_summary, print_report, schema_table};
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            let message = format!("{error:#}");
            tracing::error!(error = %message, "command failed");
            eprintln!("error: {message}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let file = FileConfig::discover(cli.config.as_deref())?;
    let settings = Settings::resolve(&file, &cli.overrides())?;
    match &cli.command {
        Command::Load(args) => {
            let outcome = run_load(&settings, args.export_dir.as_deref())?;
            print_etl_summary(&outcome);
            Ok(0)
        }
        Command::Transform(args) => {
            let outcome = run_transform(&settings, &args.export_dir)?;
            print_etl_summary(&outcome);
            Ok(0)
        }
        Command::Report(_) => {
            let outcome = run_kpi_report(&settings)?;
            print_report(&outcome);
            Ok(if outcome.is_success() { 0 } else { 1 })
        }
        Command::Schema => {
            let tables = run_schema(&settings)?;
            println!("{}", schema_table(&tables));
            Ok(0)
        }
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
