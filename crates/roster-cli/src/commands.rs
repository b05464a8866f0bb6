use anyhow::Result;
use roster_cli::pipeline::{self, CheckTargets};
use roster_cli::types::{MergeConfig, worst_status};
use roster_ingest::CheckStatus;
use roster_match::MergeColumns;

use crate::cli::{CheckArgs, MergeArgs, NormalizeArgs};
use crate::summary::{print_checks, print_keys, print_merge};

/// Returns the process exit code.
pub fn run_merge(args: &MergeArgs) -> Result<i32> {
    let config = MergeConfig {
        primary: args.primary.clone(),
        secondary: args.secondary.clone(),
        output_dir: args.output_dir.clone(),
        rules: args.rules.clone(),
        columns: args.merge_columns(),
        options: args.merge_options(),
        format: !args.no_format,
        dry_run: args.dry_run,
    };
    let run = pipeline::run_merge(&config)?;
    print_merge(&run, args.show);
    Ok(if run.has_errors() { 1 } else { 0 })
}

pub fn run_check(args: &CheckArgs) -> Result<i32> {
    let targets = CheckTargets {
        primary: args.primary.as_deref(),
        secondary: args.secondary.as_deref(),
        merged: args.merged.as_deref(),
    };
    let columns = MergeColumns {
        primary_name: args.columns.name_column.clone(),
        secondary: args.columns.secondary(),
        labels: None,
    };
    let checks = pipeline::run_checks(&targets, &columns)?;
    print_checks(&checks);
    Ok(if worst_status(&checks) == CheckStatus::Error { 1 } else { 0 })
}

pub fn run_normalize(args: &NormalizeArgs) -> Result<i32> {
    let keys = pipeline::normalize_names(&args.names, args.rules.as_deref())?;
    print_keys(&keys);
    Ok(0)
}
