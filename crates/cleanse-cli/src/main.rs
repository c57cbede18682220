//! Cleanse CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use tracing::debug;
use tracing::level_filters::LevelFilter;

use cleanse_cli::logging::{LogConfig, LogFormat, init_logging};
use cleanse_cli::settings::load_settings;
use cleanse_client::TransportError;
use cleanse_core::PipelineError;

mod cli;
mod commands;
mod progress;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_health, run_process, run_validate};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(error) => {
            report_error(&error);
            1
        }
    };
    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<()> {
    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(url) = &cli.service_url {
        settings.service.base_url = url.clone();
    }
    match &cli.command {
        Command::Validate(args) => run_validate(args, &settings),
        Command::Process(args) => run_process(args, &settings, cli.log_data).await,
        Command::Health => run_health(&settings, cli.log_data).await,
    }
}

/// Show the user-facing message; the diagnostic chain goes to the log.
fn report_error(error: &anyhow::Error) {
    debug!(error = %format!("{error:#}"), "command failed");
    if let Some(error) = error.downcast_ref::<PipelineError>() {
        eprintln!("error: {}", error.user_message());
    } else if let Some(error) = error.downcast_ref::<TransportError>() {
        eprintln!("error: {}", error.user_message());
    } else {
        eprintln!("error: {error:#}");
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
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("cleanse").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn default_flags_defer_to_rust_log() {
        let config = log_config_from_cli(&parse(&["health"]));
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(config.use_env_filter);
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn explicit_level_wins_over_verbosity() {
        let config = log_config_from_cli(&parse(&["-v", "--log-level", "error", "health"]));
        assert_eq!(config.level_filter, LevelFilter::ERROR);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn log_file_disables_ansi_in_auto_mode() {
        let config = log_config_from_cli(&parse(&[
            "--log-file",
            "/tmp/cleanse.log",
            "--log-format",
            "json",
            "health",
        ]));
        assert!(!config.with_ansi);
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn process_flags_parse() {
        let cli = parse(&[
            "--service-url",
            "http://localhost:9000",
            "--log-data",
            "process",
            "data.csv",
            "--media-type",
            "text/csv",
            "--export",
            "--output-dir",
            "out",
        ]);
        assert_eq!(cli.service_url.as_deref(), Some("http://localhost:9000"));
        assert!(cli.log_data);
        let Command::Process(args) = cli.command else {
            panic!("expected process command");
        };
        assert_eq!(args.file.file, std::path::PathBuf::from("data.csv"));
        assert_eq!(args.file.media_type.as_deref(), Some("text/csv"));
        assert!(args.export);
        assert!(args.html.is_none());
    }
}
