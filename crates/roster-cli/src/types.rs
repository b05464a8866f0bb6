use std::path::PathBuf;

use roster_ingest::{CheckResult, CheckStatus, OutputPaths};
use roster_match::{MergeColumns, MergeOptions};
use roster_model::MergeOutcome;
use roster_normalize::FormatReport;

/// Everything one merge run needs to know.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    pub primary: PathBuf,
    pub secondary: PathBuf,
    pub output_dir: PathBuf,
    pub rules: Option<PathBuf>,
    pub columns: MergeColumns,
    pub options: MergeOptions,
    /// Apply the format plan to the primary dataset before matching.
    pub format: bool,
    pub dry_run: bool,
}

impl MergeConfig {
    pub fn new(primary: impl Into<PathBuf>, secondary: impl Into<PathBuf>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
            output_dir: PathBuf::from("output"),
            rules: None,
            columns: MergeColumns::default(),
            options: MergeOptions::default(),
            format: true,
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WrittenOutputs {
    pub paths: OutputPaths,
    pub merged_rows: usize,
    pub unmatched_rows: usize,
}

#[derive(Debug, Clone)]
pub struct MergeRun {
    pub outcome: MergeOutcome,
    pub format: FormatReport,
    pub checks: Vec<CheckResult>,
    /// An input check reported an error; outputs are withheld.
    pub blocked: bool,
    /// `None` for dry runs, blocked runs and merges without matches.
    pub outputs: Option<WrittenOutputs>,
}

impl MergeRun {
    /// A blocked run or a merge without a single match is a failed run.
    pub fn has_errors(&self) -> bool {
        self.blocked
            || !self.outcome.has_matches()
            || worst_status(&self.checks) == CheckStatus::Error
    }
}

/// Worst status across a set of check results.
pub fn worst_status(checks: &[CheckResult]) -> CheckStatus {
    checks
        .iter()
        .map(|check| check.status)
        .max()
        .unwrap_or(CheckStatus::Passed)
}
