//! CLI argument definitions for the dq tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dq",
    version,
    about = "Profile a tabular dataset for quality defects and apply auditable fixes",
    long_about = "Profile a CSV dataset for data-quality defects (missing values, \
                  duplicates, outliers, inconsistent categories) and apply named, \
                  parameterized transformations with before/after evidence."
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
    /// Profile a dataset and report data-quality issues.
    Analyze(AnalyzeArgs),

    /// Apply one corrective transformation and report its evidence.
    Clean(CleanArgs),
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to the input CSV file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Emit the full analysis report as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,

    /// Write the JSON report to a file.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Exit non-zero when any high-severity issue is found.
    #[arg(long = "fail-on-high")]
    pub fail_on_high: bool,

    /// Analyze at most the first N records.
    #[arg(long = "max-rows", value_name = "N")]
    pub max_rows: Option<usize>,

    /// Column missing fraction that triggers an issue (default 0.2).
    #[arg(long = "col-missing-threshold", value_name = "FRACTION")]
    pub col_missing_threshold: Option<f64>,

    /// Row missing fraction that flags a sparse row (default 0.5).
    #[arg(long = "row-missing-threshold", value_name = "FRACTION")]
    pub row_missing_threshold: Option<f64>,

    /// Unique fraction for primary-key candidates (default 0.98).
    #[arg(long = "pk-threshold", value_name = "FRACTION")]
    pub pk_threshold: Option<f64>,

    /// Tukey fence multiplier for outlier detection (default 1.5).
    #[arg(long = "iqr-k", value_name = "K")]
    pub iqr_k: Option<f64>,

    /// Similarity threshold for categorical clustering (default 0.85).
    #[arg(long = "fuzzy-ratio", value_name = "RATIO")]
    pub fuzzy_ratio: Option<f64>,

    /// Text length counted as suspicious (default 1000).
    #[arg(long = "text-length-threshold", value_name = "CHARS")]
    pub text_length_threshold: Option<usize>,
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Path to the input CSV file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Transformation to apply.
    #[arg(long = "transform", value_enum)]
    pub transform: TransformArg,

    /// Target column.
    #[arg(long = "column", value_name = "NAME")]
    pub column: String,

    /// Fill strategy (fill-missing only).
    #[arg(long = "strategy", value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Constant fill value (fill-missing with --strategy constant).
    #[arg(long = "value", value_name = "VALUE")]
    pub value: Option<String>,

    /// Tukey fence multiplier (clip-outliers only).
    #[arg(long = "k", value_name = "K", default_value_t = 1.5)]
    pub k: f64,

    /// Out-of-range handling (clip-outliers only).
    #[arg(long = "method", value_enum, default_value = "clip")]
    pub method: MethodArg,

    /// Flag column name for --method flag (default "_outliers").
    #[arg(long = "flag-column", value_name = "NAME")]
    pub flag_column: Option<String>,

    /// Write the cleaned records to a CSV file.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Emit the transformation result as JSON instead of a summary.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TransformArg {
    CoerceNumeric,
    CoerceDatetime,
    FillMissing,
    ClipOutliers,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    Mean,
    Median,
    Mode,
    Constant,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MethodArg {
    Clip,
    Flag,
    Remove,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
