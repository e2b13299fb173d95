//! CLI argument definitions for the template audit tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "emis-template-audit",
    version,
    about = "EMIS Template Audit - Extract and resolve clinical codes from template XML",
    long_about = "Traverse a folder of EMIS template XML files, extract every coded\n\
                  component with its surrounding context, resolve internal EMIS\n\
                  identifiers to Read codes via a code lookup export, and write a\n\
                  flattened CSV report."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Audit a folder of EMIS templates and write the CSV report.
    Audit(AuditArgs),

    /// List the report columns in output order.
    Columns,
}

#[derive(Parser)]
pub struct AuditArgs {
    /// Path to the EMIS template XML folder.
    #[arg(value_name = "TEMPLATES_FOLDER")]
    pub templates_folder: PathBuf,

    /// Code lookup reference CSV (export of the CodeLookup table).
    #[arg(long = "lookup", value_name = "PATH", env = "EMIS_CODE_LOOKUP")]
    pub lookup: PathBuf,

    /// Report output path (default: timestamped file in the temp directory).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// What to do with a template file that cannot be parsed as XML.
    ///
    /// A skipped file is named in the log and the run summary, and none of
    /// its records reach the report.
    #[arg(long = "on-parse-error", value_enum, default_value = "abort")]
    pub on_parse_error: ParseErrorPolicyArg,
}

/// Parse-failure policy choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ParseErrorPolicyArg {
    Abort,
    Skip,
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
