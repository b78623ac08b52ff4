//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "parity",
    version,
    about = "Reconcile a source system export against a target system export",
    long_about = "Reconcile two tabular exports of the same business records.\n\n\
                  Detects the field mapping and identifier columns inside each\n\
                  workbook, compares mapped fields with type-aware rules, and\n\
                  writes mismatch/missing/extra CSV reports per workbook."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

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
    /// Reconcile one or more workbooks and write CSV reports.
    Run(RunArgs),

    /// Show what detection would do with a workbook, without reconciling.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Workbooks to reconcile: .xlsx/.xls/.ods files or folders of CSV
    /// files (one file per sheet).
    #[arg(value_name = "WORKBOOK", required = true)]
    pub workbooks: Vec<PathBuf>,

    /// Root directory for reports (one subdirectory per workbook).
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// JSON run configuration (sheet tokens, identifier overrides, default
    /// mapping, reference check).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Workbook to inspect.
    #[arg(value_name = "WORKBOOK")]
    pub workbook: PathBuf,

    /// JSON run configuration to apply while inspecting.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
