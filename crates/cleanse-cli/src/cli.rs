//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cleanse",
    version,
    about = "Submit a tabular file to the processing service and preview the result",
    long_about = "Validate a CSV, JSON or XML file, send it to the processing service,\n\
                  and show the returned statistics plus a preview of the cleaned data.\n\
                  The processed CSV can be written to an HTML report or exported."
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

    /// Log output format (pretty for human, json for machine parsing).
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

    /// Allow service response bodies in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Settings file (default: platform config folder).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Processing service base URL (overrides settings).
    #[arg(long = "service-url", value_name = "URL", global = true)]
    pub service_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check a file against the intake policy without sending it.
    Validate(FileArgs),

    /// Send a file to the processing service and show the result.
    Process(ProcessArgs),

    /// Check whether the processing service is reachable.
    Health,
}

#[derive(Args)]
pub struct FileArgs {
    /// CSV, JSON or XML file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Declared media type, e.g. text/csv.
    #[arg(long = "media-type", value_name = "TYPE")]
    pub media_type: Option<String>,
}

#[derive(Args)]
pub struct ProcessArgs {
    #[command(flatten)]
    pub file: FileArgs,

    /// Also write the statistics and preview as an HTML page.
    #[arg(long = "html", value_name = "PATH")]
    pub html: Option<PathBuf>,

    /// Save the processed CSV after a successful run.
    #[arg(long = "export")]
    pub export: bool,

    /// Folder for exported files (default: settings, then current folder).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
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
