//! CLI argument definitions for the shot transpiler.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "shot-transpiler",
    version,
    about = "Shot Transpiler - Convert launch-monitor shot exports for dispersion analysis",
    long_about = "Convert launch-monitor shot exports into the Club, Type, Target, Total, Side\n\
                  layout used by shot-dispersion tools.\n\n\
                  Club labels and columns are mapped through a JSON configuration file;\n\
                  shots can be reviewed and removed club by club before export."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Transform a launch-monitor CSV export and write the dispersion-tool CSV.
    Transform(TransformArgs),

    /// List every supported club identifier.
    Clubs,

    /// Show the loaded configuration.
    Config(ConfigArgs),

    /// Print per-club statistics of a previously exported file.
    Stats(StatsArgs),
}

#[derive(Parser)]
pub struct TransformArgs {
    /// Launch-monitor CSV export to transform.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Configuration file (default: ./config.json).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output directory for the exported file (default: ./data/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// The row after the header is data, not a units row.
    #[arg(long = "no-units-row")]
    pub no_units_row: bool,

    /// Accept every default without prompting; skips shot review.
    #[arg(long = "yes", short = 'y')]
    pub yes: bool,

    /// Skip the shot review step.
    #[arg(long = "no-review")]
    pub no_review: bool,

    /// Run every stage but do not write the export file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct ConfigArgs {
    /// Configuration file (default: ./config.json).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Parser)]
pub struct StatsArgs {
    /// File written by `transform`.
    #[arg(value_name = "EXPORT_FILE")]
    pub file: PathBuf,

    /// Configuration file to take display units from (default units: meters).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
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
