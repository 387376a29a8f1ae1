//! CLI argument definitions for sheetplan.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "sheetplan",
    version,
    about = "Sheetplan - Infer budget plan trees from spreadsheet data",
    long_about = "Turn loosely structured budget sheets into a plan tree ready for review.\n\n\
                  Rows are classified into groups and items by structural rules, item\n\
                  terms receive semantic tags from layered memory, and corrections are\n\
                  stored per user so the predictor improves with use."
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
    /// Analyze a sheet and print the inferred plan tree.
    Analyze(AnalyzeArgs),

    /// Print column statistics and the suggested layout for a sheet.
    Profile(ProfileArgs),

    /// Record a tag correction and teach the predictor.
    Learn(LearnArgs),

    /// List stored corrections.
    Corrections(CorrectionsArgs),
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to the CSV sheet to analyze.
    #[arg(value_name = "SHEET_FILE")]
    pub file: PathBuf,

    /// Sheet name (default: the file stem).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// Category column as a letter ("A") or zero-based index (default: auto-detect).
    #[arg(long = "category-column", value_name = "COL")]
    pub category_column: Option<String>,

    /// Value column as a letter ("B") or zero-based index (default: auto-detect).
    #[arg(long = "value-column", value_name = "COL")]
    pub value_column: Option<String>,

    /// First row of the walk, zero-based.
    #[arg(long = "start-row", value_name = "ROW", default_value_t = 0)]
    pub start_row: usize,

    /// Rows sampled when detecting the column layout.
    #[arg(long = "max-rows", value_name = "N", default_value_t = 200)]
    pub max_rows: usize,

    /// User whose stored corrections are replayed into the predictor.
    #[arg(long = "user", value_name = "NAME", default_value = "local")]
    pub user: String,

    /// Directory holding per-user correction files.
    #[arg(
        long = "corrections-dir",
        value_name = "DIR",
        default_value = ".sheetplan/corrections"
    )]
    pub corrections_dir: PathBuf,

    /// Emit the analysis as JSON instead of text output.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ProfileArgs {
    /// Path to the CSV sheet to profile.
    #[arg(value_name = "SHEET_FILE")]
    pub file: PathBuf,

    /// Sheet name (default: the file stem).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// Rows sampled when building the profiles.
    #[arg(long = "max-rows", value_name = "N", default_value_t = 200)]
    pub max_rows: usize,

    /// Emit the profiles as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct LearnArgs {
    /// Term being corrected, as it appears in the sheet.
    #[arg(value_name = "TERM")]
    pub term: String,

    /// Tag the term should map to.
    #[arg(value_name = "TAG", value_enum)]
    pub tag: TagArg,

    /// Tag the predictor had suggested (default: ask the predictor).
    #[arg(long = "predicted", value_enum)]
    pub predicted: Option<TagArg>,

    /// User recording the correction.
    #[arg(long = "user", value_name = "NAME", default_value = "local")]
    pub user: String,

    /// Directory holding per-user correction files.
    #[arg(
        long = "corrections-dir",
        value_name = "DIR",
        default_value = ".sheetplan/corrections"
    )]
    pub corrections_dir: PathBuf,

    /// Sheet file the correction came from, recorded for provenance.
    #[arg(long = "source-file", value_name = "PATH")]
    pub source_file: Option<String>,
}

#[derive(Parser)]
pub struct CorrectionsArgs {
    /// Only list this user's corrections (default: every user).
    #[arg(long = "user", value_name = "NAME")]
    pub user: Option<String>,

    /// Directory holding per-user correction files.
    #[arg(
        long = "corrections-dir",
        value_name = "DIR",
        default_value = ".sheetplan/corrections"
    )]
    pub corrections_dir: PathBuf,

    /// Emit corrections as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

/// CLI tag choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum TagArg {
    Budget,
    Recurring,
    Savings,
    Income,
    Debt,
    Unknown,
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
