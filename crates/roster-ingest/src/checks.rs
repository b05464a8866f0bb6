//! Data-quality checks on the input and merged datasets.
//!
//! Checks report; they never modify data and never stop a merge.

use roster_model::{Dataset, MergedDataset, MetricValue, SecondaryColumns};
use serde::Serialize;

/// Share of populated primary names below which a warning is raised.
pub const NAME_COMPLETENESS_MIN: f64 = 80.0;
/// Share of numeric metric values below which a warning is raised.
pub const NUMERIC_METRIC_MIN: f64 = 90.0;
pub const MERGED_SECONDARY_COLUMNS_MIN: usize = 2;
pub const MERGED_PRIMARY_COLUMNS_MIN: usize = 5;

/// Primary columns the downstream consumers rely on, besides the name column.
pub const PRIMARY_REQUIRED_COLUMNS: &[&str] = &["Position", "Height_Imperial", "Born_Date"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Passed,
    Warning,
    Error,
}

impl CheckStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub check: &'static str,
    pub status: CheckStatus,
    pub description: String,
}

impl CheckResult {
    fn new(check: &'static str, status: CheckStatus, description: String) -> Self {
        Self {
            check,
            status,
            description,
        }
    }

    pub fn passed(&self) -> bool {
        self.status == CheckStatus::Passed
    }
}

/// Required primary columns and name completeness.
pub fn check_primary(primary: &Dataset, name_column: &str) -> CheckResult {
    const CHECK: &str = "primary_completeness";
    let missing: Vec<&str> = std::iter::once(name_column)
        .chain(PRIMARY_REQUIRED_COLUMNS.iter().copied())
        .filter(|column| !primary.has_column(column))
        .collect();
    if !missing.is_empty() {
        return CheckResult::new(
            CHECK,
            CheckStatus::Error,
            format!("missing required columns: {}", missing.join(", ")),
        );
    }
    if primary.is_empty() {
        return CheckResult::new(CHECK, CheckStatus::Error, "primary dataset has no rows".to_string());
    }

    let completeness = primary
        .column_index(name_column)
        .map_or(0.0, |column| primary.completeness(column));
    if completeness < NAME_COMPLETENESS_MIN {
        return CheckResult::new(
            CHECK,
            CheckStatus::Warning,
            format!(
                "only {completeness:.1}% of player names are populated (expected >= {NAME_COMPLETENESS_MIN:.0}%)"
            ),
        );
    }
    CheckResult::new(
        CHECK,
        CheckStatus::Passed,
        format!(
            "{completeness:.1}% name completeness, {} total players",
            primary.row_count()
        ),
    )
}

/// Required secondary columns and numeric metric values.
pub fn check_secondary(secondary: &Dataset, columns: &SecondaryColumns) -> CheckResult {
    const CHECK: &str = "secondary_validity";
    let layout = match columns.resolve(secondary) {
        Ok(layout) => layout,
        Err(_) => {
            return CheckResult::new(
                CHECK,
                CheckStatus::Error,
                format!(
                    "missing required columns: {}, {} or {}",
                    columns.rank, columns.name, columns.metric
                ),
            );
        }
    };
    if secondary.is_empty() {
        return CheckResult::new(CHECK, CheckStatus::Error, "secondary dataset has no rows".to_string());
    }

    let numeric = secondary
        .rows
        .iter()
        .filter(|row| MetricValue::parse(row.raw(layout.metric)).is_numeric())
        .count();
    let ratio = numeric as f64 * 100.0 / secondary.row_count() as f64;
    if ratio < NUMERIC_METRIC_MIN {
        return CheckResult::new(
            CHECK,
            CheckStatus::Warning,
            format!(
                "only {ratio:.1}% of {} values are valid numbers (expected >= {NUMERIC_METRIC_MIN:.0}%)",
                columns.metric
            ),
        );
    }
    CheckResult::new(
        CHECK,
        CheckStatus::Passed,
        format!(
            "{ratio:.1}% valid {} values, {} total players",
            columns.metric,
            secondary.row_count()
        ),
    )
}

/// Column coverage of the merged dataset.
pub fn check_merged(merged: &MergedDataset) -> CheckResult {
    merged_coverage(merged.schema.columns.len(), merged.len())
}

/// Same as [`check_merged`] for a merged file read back from disk.
pub fn check_merged_table(merged: &Dataset) -> CheckResult {
    merged_coverage(merged.columns.len(), merged.row_count())
}

fn merged_coverage(total_columns: usize, rows: usize) -> CheckResult {
    const CHECK: &str = "merged_quality";
    if rows == 0 {
        return CheckResult::new(CHECK, CheckStatus::Error, "merged dataset has no rows".to_string());
    }
    // Rank and metric come from the secondary dataset, everything else from the primary.
    let secondary_columns = total_columns.min(2);
    let primary_columns = total_columns - secondary_columns;
    if secondary_columns < MERGED_SECONDARY_COLUMNS_MIN || primary_columns < MERGED_PRIMARY_COLUMNS_MIN {
        return CheckResult::new(
            CHECK,
            CheckStatus::Warning,
            format!(
                "merged data may be incomplete: {secondary_columns} secondary columns, {primary_columns} primary columns"
            ),
        );
    }
    CheckResult::new(
        CHECK,
        CheckStatus::Passed,
        format!("{rows} players merged with {total_columns} total columns"),
    )
}

#[cfg(test)]
mod tests {
    use roster_model::{MatchKind, MergeLabels, MergedRecord, MergedSchema};

    use super::*;

    fn dataset(columns: &[&str], rows: &[&[&str]]) -> Dataset {
        let mut dataset = Dataset::new(columns.iter().map(|c| c.to_string()).collect());
        for row in rows {
            dataset.push_row(row.iter().map(|v| v.to_string()).collect());
        }
        dataset
    }

    const PRIMARY: &[&str] = &["Name", "Position", "Height_Imperial", "Born_Date"];

    #[test]
    fn primary_missing_columns_is_error() {
        let result = check_primary(&dataset(&["Name", "Position"], &[&["A", "G"]]), "Name");
        assert_eq!(result.status, CheckStatus::Error);
        assert!(result.description.contains("Height_Imperial, Born_Date"));
    }

    #[test]
    fn primary_name_completeness() {
        let rows: &[&[&str]] = &[
            &["A", "G", "6-1", "x"],
            &["", "G", "6-1", "x"],
            &["C", "G", "6-1", "x"],
            &["D", "G", "6-1", "x"],
        ];
        let result = check_primary(&dataset(PRIMARY, rows), "Name");
        assert_eq!(result.status, CheckStatus::Warning);
        assert!(result.description.starts_with("only 75.0%"));

        let full = check_primary(&dataset(PRIMARY, &rows[..1]), "Name");
        assert!(full.passed());
    }

    #[test]
    fn empty_datasets_are_errors() {
        assert_eq!(check_primary(&dataset(PRIMARY, &[]), "Name").status, CheckStatus::Error);
        let secondary = dataset(&["RK", "Player", "PTS"], &[]);
        assert_eq!(
            check_secondary(&secondary, &SecondaryColumns::default()).status,
            CheckStatus::Error
        );
        assert_eq!(check_merged(&MergedDataset::empty()).status, CheckStatus::Error);
    }

    #[test]
    fn secondary_numeric_ratio() {
        let mut rows: Vec<&[&str]> = Vec::new();
        for _ in 0..9 {
            rows.push(&["1", "A", "38,652"]);
        }
        rows.push(&["10", "B", "n/a"]);
        let columns = SecondaryColumns::default();
        let result = check_secondary(&dataset(&["RK", "Player", "PTS"], &rows), &columns);
        assert!(result.passed(), "{}", result.description);

        rows.push(&["11", "C", ""]);
        let result = check_secondary(&dataset(&["RK", "Player", "PTS"], &rows), &columns);
        assert_eq!(result.status, CheckStatus::Warning);
    }

    #[test]
    fn merged_column_coverage() {
        let primary = dataset(&["Name", "Position"], &[]);
        let schema = MergedSchema::build(&primary, "Name", &MergeLabels::default()).unwrap();
        let mut merged = MergedDataset::new(schema);
        merged.records.push(MergedRecord {
            secondary_row: 0,
            primary_row: 0,
            kind: MatchKind::Exact,
            values: vec!["1".into(), "A".into(), "10".into(), "G".into()],
        });
        let result = check_merged(&merged);
        assert_eq!(result.status, CheckStatus::Warning);
        assert!(result.description.contains("2 primary columns"));

        let columns = ["RK", "Name", "PTS", "Position", "Height", "Born_Date", "Born_Location"];
        let row = ["1", "A", "10", "G", "6-1", "1990-01-01", "Akron, Ohio"];
        let table = dataset(&columns, &[&row]);
        assert!(check_merged_table(&table).passed());
    }
}
