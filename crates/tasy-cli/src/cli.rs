//! CLI argument definitions for the TASY import builder.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use tasy_model::Protocol;

#[derive(Parser)]
#[command(
    name = "tasy-import",
    version,
    about = "Build TASY lab result import tables from laboratory spreadsheets",
    long_about = "Reconcile laboratory result spreadsheets against the patient registry\n\
                  and produce the TASY import table plus a report of patients that\n\
                  could not be matched to a visit."
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

    /// Allow patient names in logs and in the run summary.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Configuration file (default: $TASY_CONFIG, then ./config_exames.json).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reconcile lab results and write the TASY import table.
    Run(RunArgs),

    /// List the exam catalog with its lab column aliases.
    Exams(ExamsArgs),

    /// List configured facilities and their codes.
    Facilities,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Basic exam results table (CSV export).
    #[arg(long = "basic", value_name = "PATH")]
    pub basic: PathBuf,

    /// Supplementary results table (CSV export).
    #[arg(long = "supplementary", value_name = "PATH")]
    pub supplementary: Option<PathBuf>,

    /// Patient registry with names and visit numbers (CSV export).
    #[arg(long = "patients", value_name = "PATH")]
    pub patients: PathBuf,

    /// Protocol label written on every row.
    #[arg(long = "protocol", value_enum, default_value = "mensal")]
    pub protocol: ProtocolArg,

    /// Facility applied to every row (default: first configured facility).
    #[arg(long = "facility", value_name = "NAME", conflicts_with = "facility_from_sector")]
    pub facility: Option<String>,

    /// Resolve each row's facility from its requesting sector column.
    #[arg(long = "facility-from-sector")]
    pub facility_from_sector: bool,

    /// Directory for the generated files.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Field separator of the generated files.
    #[arg(long = "separator", value_name = "CHAR", default_value = ",", value_parser = parse_separator)]
    pub separator: u8,

    /// Run the whole reconciliation without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct ExamsArgs {
    /// Only show exams whose code, name or lab columns contain TEXT.
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,
}

/// CLI protocol choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ProtocolArg {
    Mensal,
    Trimestral,
    Semestral,
    Anual,
}

impl From<ProtocolArg> for Protocol {
    fn from(value: ProtocolArg) -> Self {
        match value {
            ProtocolArg::Mensal => Protocol::Mensal,
            ProtocolArg::Trimestral => Protocol::Trimestral,
            ProtocolArg::Semestral => Protocol::Semestral,
            ProtocolArg::Anual => Protocol::Anual,
        }
    }
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

fn parse_separator(value: &str) -> Result<u8, String> {
    match value.as_bytes() {
        [byte] if byte.is_ascii() && !byte.is_ascii_alphanumeric() => Ok(*byte),
        _ if value == "\\t" || value.eq_ignore_ascii_case("tab") => Ok(b'\t'),
        _ => Err(format!("separator must be one ASCII symbol, got {value:?}")),
    }
}
