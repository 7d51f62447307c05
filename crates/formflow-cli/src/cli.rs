//! CLI argument definitions for `formflow`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "formflow",
    version,
    about = "Apply plain-English instructions to structured form data",
    long_about = "Apply plain-English instructions to structured form data.\n\n\
                  Instructions are decoded into actions, dispatched through an\n\
                  undoable state machine, and narrated back as sentences."
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
    /// Decode and apply instructions, narrating each step.
    Apply(ApplyArgs),

    /// Describe a data file field by field using a schema.
    Describe(DescribeArgs),

    /// Show how a sentence decodes without applying it.
    Parse(ParseArgs),
}

#[derive(Parser)]
pub struct ApplyArgs {
    /// JSON file with the initial data (default: an empty object).
    #[arg(long = "data", value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// JSON schema file used to describe and type-check the final state.
    #[arg(long = "schema", value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Maximum number of undo and redo snapshots.
    #[arg(long = "max-history", value_name = "N")]
    pub max_history: Option<usize>,

    /// File with one instruction per line, applied before positional ones.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    #[arg(long = "script", value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Print the final form state (data, errors, touched, history) as JSON.
    #[arg(long = "json")]
    pub json: bool,

    /// Instructions such as "set background to forest" or "undo".
    #[arg(value_name = "INSTRUCTION")]
    pub instructions: Vec<String>,
}

#[derive(Parser)]
pub struct DescribeArgs {
    /// JSON file with the data to describe.
    #[arg(long = "data", value_name = "FILE")]
    pub data: PathBuf,

    /// JSON schema file listing the fields to describe.
    #[arg(long = "schema", value_name = "FILE")]
    pub schema: PathBuf,
}

#[derive(Parser)]
pub struct ParseArgs {
    /// Sentence to decode; several clauses may be separated by `,` or `;`.
    #[arg(value_name = "TEXT", required = true, num_args = 1..)]
    pub text: Vec<String>,
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
