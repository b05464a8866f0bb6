//! CLI argument definitions for rostermerge.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use roster_match::{DEFAULT_THRESHOLD, MergeColumns, MergeOptions};
use roster_model::{MergeLabels, SecondaryColumns};

#[derive(Parser)]
#[command(
    name = "rostermerge",
    version,
    about = "Reconcile a ranked leaderboard with a player directory",
    long_about = "Merge a ranked metric table (rank, player, metric) into a richer player\n\
                  directory by canonical name, falling back to token-overlap matching.\n\
                  Writes the merged rows, the unmatched rows and match statistics."
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
    /// Merge the secondary leaderboard into the primary directory.
    Merge(MergeArgs),

    /// Run data-quality checks on input or merged files.
    Check(CheckArgs),

    /// Print the canonical key of each name.
    Normalize(NormalizeArgs),
}

/// Column names shared by `merge` and `check`.
#[derive(Args, Clone)]
pub struct ColumnArgs {
    /// Display-name column of the primary file.
    #[arg(long = "name-column", value_name = "COLUMN", default_value = "Name")]
    pub name_column: String,

    /// Rank column of the secondary file.
    #[arg(long = "rank-column", value_name = "COLUMN", default_value = "RK")]
    pub rank_column: String,

    /// Player-name column of the secondary file.
    #[arg(long = "player-column", value_name = "COLUMN", default_value = "Player")]
    pub player_column: String,

    /// Metric column of the secondary file.
    #[arg(long = "metric-column", value_name = "COLUMN", default_value = "PTS")]
    pub metric_column: String,
}

impl ColumnArgs {
    pub fn secondary(&self) -> SecondaryColumns {
        SecondaryColumns {
            rank: self.rank_column.clone(),
            name: self.player_column.clone(),
            metric: self.metric_column.clone(),
        }
    }
}

#[derive(Parser)]
pub struct MergeArgs {
    /// Primary player directory (CSV).
    #[arg(long = "primary", value_name = "CSV")]
    pub primary: PathBuf,

    /// Secondary ranked leaderboard (CSV).
    #[arg(long = "secondary", value_name = "CSV")]
    pub secondary: PathBuf,

    /// Directory for merged, unmatched and stats outputs.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub columns: ColumnArgs,

    /// Output label for the rank column (default: the rank column name).
    #[arg(long = "rank-label", value_name = "LABEL")]
    pub rank_label: Option<String>,

    /// Output label for the metric column (default: the metric column name).
    #[arg(long = "metric-label", value_name = "LABEL")]
    pub metric_label: Option<String>,

    /// Minimum share of name tokens a fuzzy match must cover, in (0, 1].
    #[arg(long = "threshold", value_name = "RATIO", default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// JSON rules file with extra aliases and a column format plan.
    #[arg(long = "rules", value_name = "JSON")]
    pub rules: Option<PathBuf>,

    /// Leave primary columns exactly as loaded (no formatting or drops).
    #[arg(long = "no-format")]
    pub no_format: bool,

    /// Match secondary rows on all cores.
    #[arg(long = "parallel")]
    pub parallel: bool,

    /// Suggest the closest primary name for every unmatched row.
    #[arg(long = "suggest")]
    pub suggest: bool,

    /// Merge and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Matched rows to print (0 prints none).
    #[arg(long = "show", value_name = "N", default_value_t = 20)]
    pub show: usize,
}

impl MergeArgs {
    pub fn merge_columns(&self) -> MergeColumns {
        let secondary = self.columns.secondary();
        let labels = if self.rank_label.is_some() || self.metric_label.is_some() {
            Some(MergeLabels {
                rank: self
                    .rank_label
                    .clone()
                    .unwrap_or_else(|| secondary.rank.clone()),
                metric: self
                    .metric_label
                    .clone()
                    .unwrap_or_else(|| secondary.metric.clone()),
            })
        } else {
            None
        };
        MergeColumns {
            primary_name: self.columns.name_column.clone(),
            secondary,
            labels,
        }
    }

    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            threshold: self.threshold,
            parallel: self.parallel,
            suggest_unmatched: self.suggest,
        }
    }
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Primary player directory to check.
    #[arg(long = "primary", value_name = "CSV")]
    pub primary: Option<PathBuf>,

    /// Secondary leaderboard to check.
    #[arg(long = "secondary", value_name = "CSV")]
    pub secondary: Option<PathBuf>,

    /// Merged output to check.
    #[arg(long = "merged", value_name = "CSV")]
    pub merged: Option<PathBuf>,

    #[command(flatten)]
    pub columns: ColumnArgs,
}

#[derive(Parser)]
pub struct NormalizeArgs {
    /// Names to normalize.
    #[arg(value_name = "NAME", required = true)]
    pub names: Vec<String>,

    /// JSON rules file with extra aliases.
    #[arg(long = "rules", value_name = "JSON")]
    pub rules: Option<PathBuf>,
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
