//! Merge and check stages, independent of argument parsing and printing.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use roster_ingest::{
    CheckResult, CheckStatus, OutputPaths, check_merged, check_merged_table, check_primary,
    check_secondary, load_rules, read_dataset, require_columns, write_merged_csv,
    write_stats_json, write_unmatched_csv,
};
use roster_match::{MergeColumns, MergeEngine};
use roster_model::{Dataset, MergeOutcome};
use roster_normalize::{FormatPlan, FormatReport, NormalizationRules};
use tracing::{error, info, info_span, warn};

use crate::types::{MergeConfig, MergeRun, WrittenOutputs, worst_status};

/// Loaded and formatted inputs of a merge.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub rules: NormalizationRules,
    pub primary: Dataset,
    pub secondary: Dataset,
    pub format: FormatReport,
    pub checks: Vec<CheckResult>,
}

pub fn run_merge(config: &MergeConfig) -> Result<MergeRun> {
    let span = info_span!(
        "merge_run",
        primary = %config.primary.display(),
        secondary = %config.secondary.display()
    );
    let _guard = span.enter();

    let inputs = ingest(config)?;
    let merge_start = Instant::now();
    let outcome = MergeEngine::new(&inputs.rules)
        .with_options(config.options.clone())
        .with_columns(config.columns.clone())
        .merge(&inputs.primary, &inputs.secondary)
        .context("merge datasets")?;
    info!(
        total_matches = outcome.stats.total_matches,
        duration_ms = merge_start.elapsed().as_millis(),
        "merge stage complete"
    );

    // Input checks gate the outputs; the merged-quality check only reports.
    let blocked = worst_status(&inputs.checks) == CheckStatus::Error;
    let mut checks = inputs.checks;
    checks.push(check_merged(&outcome.merged));
    log_checks(&checks);

    let outputs = if config.dry_run {
        info!("dry run: outputs not written");
        None
    } else if blocked {
        error!("input checks failed; outputs not written");
        None
    } else if !outcome.has_matches() {
        error!(
            secondary_rows = outcome.stats.total_secondary_rows,
            "no secondary rows matched; outputs not written"
        );
        None
    } else {
        Some(write_outputs(&config.output_dir, &outcome, &config.columns)?)
    };

    Ok(MergeRun {
        outcome,
        format: inputs.format,
        checks,
        blocked,
        outputs,
    })
}

/// Loads rules and both datasets, runs the input checks and formats the
/// primary dataset.
pub fn ingest(config: &MergeConfig) -> Result<Inputs> {
    let ingest_span = info_span!("ingest");
    let _guard = ingest_span.enter();
    let start = Instant::now();

    let (rules, plan) = load_rules(config.rules.as_deref()).context("load rules")?;
    let plan = if config.format { plan } else { FormatPlan::none() };

    let mut primary = read_dataset(&config.primary)
        .with_context(|| format!("load primary dataset {}", config.primary.display()))?;
    let secondary = read_dataset(&config.secondary)
        .with_context(|| format!("load secondary dataset {}", config.secondary.display()))?;
    ensure_schema(&primary, &config.primary, &secondary, &config.secondary, &config.columns)?;

    let checks = vec![
        check_primary(&primary, &config.columns.primary_name),
        check_secondary(&secondary, &config.columns.secondary),
    ];
    let format = plan.apply(&mut primary, &rules);
    info!(
        primary_rows = primary.row_count(),
        secondary_rows = secondary.row_count(),
        formatted_columns = format.formatted.len(),
        dropped_columns = format.dropped.len(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(Inputs {
        rules,
        primary,
        secondary,
        format,
        checks,
    })
}

/// Refuses to merge when a column the engine reads is missing.
pub fn ensure_schema(
    primary: &Dataset,
    primary_path: &Path,
    secondary: &Dataset,
    secondary_path: &Path,
    columns: &MergeColumns,
) -> Result<()> {
    require_columns(primary, &[columns.primary_name.as_str()], primary_path)?;
    let secondary_columns = [
        columns.secondary.rank.as_str(),
        columns.secondary.name.as_str(),
        columns.secondary.metric.as_str(),
    ];
    require_columns(secondary, &secondary_columns, secondary_path)?;
    Ok(())
}

pub fn write_outputs(
    output_dir: &Path,
    outcome: &MergeOutcome,
    columns: &MergeColumns,
) -> Result<WrittenOutputs> {
    let output_span = info_span!("output", output_dir = %output_dir.display());
    let _guard = output_span.enter();
    let paths = OutputPaths::in_dir(output_dir);
    paths.create_dir()?;
    let merged_rows = write_merged_csv(&paths.merged, &outcome.merged)?;
    let with_suggestions = outcome.unmatched.iter().any(|entry| entry.nearest.is_some());
    let unmatched_rows = write_unmatched_csv(
        &paths.unmatched,
        &outcome.unmatched,
        &columns.secondary,
        with_suggestions,
    )?;
    write_stats_json(&paths.stats, &outcome.stats)?;
    Ok(WrittenOutputs {
        paths,
        merged_rows,
        unmatched_rows,
    })
}

/// Files to check; at least one must be given.
#[derive(Debug, Clone, Default)]
pub struct CheckTargets<'a> {
    pub primary: Option<&'a Path>,
    pub secondary: Option<&'a Path>,
    pub merged: Option<&'a Path>,
}

pub fn run_checks(targets: &CheckTargets<'_>, columns: &MergeColumns) -> Result<Vec<CheckResult>> {
    if targets.primary.is_none() && targets.secondary.is_none() && targets.merged.is_none() {
        bail!("nothing to check: pass --primary, --secondary or --merged");
    }
    let mut checks = Vec::new();
    if let Some(path) = targets.primary {
        let primary = read_dataset(path).with_context(|| format!("load {}", path.display()))?;
        checks.push(check_primary(&primary, &columns.primary_name));
    }
    if let Some(path) = targets.secondary {
        let secondary = read_dataset(path).with_context(|| format!("load {}", path.display()))?;
        checks.push(check_secondary(&secondary, &columns.secondary));
    }
    if let Some(path) = targets.merged {
        let merged = read_dataset(path).with_context(|| format!("load {}", path.display()))?;
        checks.push(check_merged_table(&merged));
    }
    log_checks(&checks);
    Ok(checks)
}

fn log_checks(checks: &[CheckResult]) {
    for check in checks {
        match check.status {
            CheckStatus::Passed => info!(check = check.check, "{}", check.description),
            CheckStatus::Warning | CheckStatus::Error => {
                warn!(check = check.check, status = check.status.as_str(), "{}", check.description);
            }
        }
    }
}

/// Canonical keys for a list of names.
pub fn normalize_names(names: &[String], rules_path: Option<&Path>) -> Result<Vec<(String, String)>> {
    let (rules, _) = load_rules(rules_path).context("load rules")?;
    Ok(names
        .iter()
        .map(|name| (name.clone(), rules.normalize(name).into_string()))
        .collect())
}
