//! Column formatting plan for the primary dataset.

use roster_model::{Dataset, INTERNAL_KEY_COLUMN};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::format::FieldFormatter;
use crate::rules::NormalizationRules;

/// Which columns get which formatter, and which columns are dropped.
///
/// Listed columns that are missing from the dataset are skipped with a warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatPlan {
    pub date_columns: Vec<String>,
    pub height_columns: Vec<String>,
    pub location_columns: Vec<String>,
    pub drop_columns: Vec<String>,
}

impl Default for FormatPlan {
    fn default() -> Self {
        Self {
            date_columns: vec!["Born_Date".to_string(), "NBA_Debut".to_string()],
            height_columns: vec!["Height_Imperial".to_string()],
            location_columns: vec!["Born_Location".to_string()],
            drop_columns: ["Pronunciation", "High School", "College", "Draft", "URL"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// What [`FormatPlan::apply`] did to a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormatReport {
    pub formatted: Vec<FormattedColumn>,
    pub missing: Vec<String>,
    pub dropped: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedColumn {
    pub column: String,
    pub formatter: FieldFormatter,
    /// Cells whose text differs after formatting.
    pub changed: usize,
}

impl FormatPlan {
    /// A plan that leaves every column untouched.
    pub fn none() -> Self {
        Self {
            date_columns: Vec::new(),
            height_columns: Vec::new(),
            location_columns: Vec::new(),
            drop_columns: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.date_columns.is_empty()
            && self.height_columns.is_empty()
            && self.location_columns.is_empty()
            && self.drop_columns.is_empty()
    }

    fn assignments(&self) -> impl Iterator<Item = (&str, FieldFormatter)> {
        let dates = self.date_columns.iter().map(|c| (c.as_str(), FieldFormatter::Date));
        let heights = self
            .height_columns
            .iter()
            .map(|c| (c.as_str(), FieldFormatter::Height));
        let locations = self
            .location_columns
            .iter()
            .map(|c| (c.as_str(), FieldFormatter::Location));
        dates.chain(heights).chain(locations)
    }

    /// Formats and drops columns in place.
    ///
    /// The internal key column is never dropped, even when listed.
    pub fn apply(&self, dataset: &mut Dataset, rules: &NormalizationRules) -> FormatReport {
        let mut report = FormatReport::default();

        for (column, formatter) in self.assignments() {
            let mut changed = 0usize;
            let found = dataset.map_column(column, |value| {
                let formatted = formatter.apply(value, rules);
                if value.unwrap_or_default() != formatted {
                    changed += 1;
                }
                formatted
            });
            if found {
                debug!(column, formatter = formatter.as_str(), changed, "formatted column");
                report.formatted.push(FormattedColumn {
                    column: column.to_string(),
                    formatter,
                    changed,
                });
            } else {
                warn!(column, formatter = formatter.as_str(), "format column not present");
                report.missing.push(column.to_string());
            }
        }

        let droppable: Vec<&str> = self
            .drop_columns
            .iter()
            .map(String::as_str)
            .filter(|column| *column != INTERNAL_KEY_COLUMN)
            .collect();
        report.dropped = dataset.drop_columns(&droppable);
        if !report.dropped.is_empty() {
            debug!(columns = ?report.dropped, "dropped columns");
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let mut dataset = Dataset::new(vec![
            "Name".to_string(),
            "Born_Date".to_string(),
            "Height_Imperial".to_string(),
            "Born_Location".to_string(),
            "URL".to_string(),
        ]);
        dataset.push_row(vec![
            "LeBron James".to_string(),
            "December 30, 1984".to_string(),
            "6-Sep".to_string(),
            "in Akron,Ohio".to_string(),
            "https://example.org".to_string(),
        ]);
        dataset
    }

    #[test]
    fn default_plan_formats_and_drops() {
        let mut dataset = sample();
        let report = FormatPlan::default().apply(&mut dataset, NormalizationRules::builtin());

        assert_eq!(
            dataset.columns,
            vec!["Name", "Born_Date", "Height_Imperial", "Born_Location"]
        );
        let row = &dataset.rows[0];
        assert_eq!(row.value(1), Some("1984-12-30"));
        assert_eq!(row.value(2), Some("6-9"));
        assert_eq!(row.value(3), Some("Akron, Ohio"));

        assert_eq!(report.dropped, vec!["URL".to_string()]);
        assert!(report.missing.contains(&"NBA_Debut".to_string()));
        assert_eq!(report.formatted.len(), 3);
        assert!(report.formatted.iter().all(|c| c.changed == 1));
    }

    #[test]
    fn empty_plan_is_a_no_op() {
        let mut dataset = sample();
        let before = dataset.clone();
        let report = FormatPlan::none().apply(&mut dataset, NormalizationRules::builtin());
        assert!(FormatPlan::none().is_empty());
        assert_eq!(dataset, before);
        assert_eq!(report, FormatReport::default());
    }

    #[test]
    fn internal_key_column_is_never_dropped() {
        let mut dataset = Dataset::new(vec!["Name".to_string(), INTERNAL_KEY_COLUMN.to_string()]);
        dataset.push_row(vec!["A".to_string(), "a".to_string()]);
        let plan = FormatPlan {
            drop_columns: vec![INTERNAL_KEY_COLUMN.to_string()],
            ..FormatPlan::none()
        };
        let report = plan.apply(&mut dataset, NormalizationRules::builtin());
        assert!(report.dropped.is_empty());
        assert!(dataset.has_column(INTERNAL_KEY_COLUMN));
    }
}
