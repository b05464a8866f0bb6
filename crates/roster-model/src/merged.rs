//! Merged output schema and records.
//!
//! The schema is computed once per merge: rank, name and metric come first,
//! followed by the remaining primary columns in primary column order.

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::{ModelError, Result};

/// Column that some primary exports carry with a precomputed canonical key.
/// It is internal and never surfaces in merged output.
pub const INTERNAL_KEY_COLUMN: &str = "Normalized_Name";

/// Output labels for the two secondary-derived merged columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeLabels {
    pub rank: String,
    pub metric: String,
}

impl Default for MergeLabels {
    fn default() -> Self {
        Self {
            rank: "RK".to_string(),
            metric: "PTS".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Fuzzy,
}

impl MatchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Fuzzy => "fuzzy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedSchema {
    /// Serialization order of the merged columns.
    pub columns: Vec<String>,
    /// Primary column index feeding each column after the leading three.
    pub primary_sources: Vec<usize>,
    /// Primary column holding the display name.
    pub name_source: usize,
}

impl MergedSchema {
    pub const LEADING_COLUMNS: usize = 3;

    pub fn build(primary: &Dataset, name_column: &str, labels: &MergeLabels) -> Result<Self> {
        let name_source = primary.require_column(name_column)?;
        let leading = [
            labels.rank.clone(),
            name_column.to_string(),
            labels.metric.clone(),
        ];
        for (idx, label) in leading.iter().enumerate() {
            if leading[..idx].contains(label) {
                return Err(ModelError::DuplicateOutputColumn(label.clone()));
            }
        }
        let mut columns = leading.to_vec();
        let mut primary_sources = Vec::new();
        for (idx, column) in primary.columns.iter().enumerate() {
            if idx == name_source || column == INTERNAL_KEY_COLUMN {
                continue;
            }
            if columns.contains(column) {
                continue;
            }
            columns.push(column.clone());
            primary_sources.push(idx);
        }
        Ok(Self {
            columns,
            primary_sources,
            name_source,
        })
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn rank_label(&self) -> &str {
        &self.columns[0]
    }

    pub fn name_label(&self) -> &str {
        &self.columns[1]
    }

    pub fn metric_label(&self) -> &str {
        &self.columns[2]
    }
}

/// One merged row, aligned with [`MergedSchema::columns`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub secondary_row: usize,
    pub primary_row: usize,
    pub kind: MatchKind,
    pub values: Vec<String>,
}

impl MergedRecord {
    pub fn rank(&self) -> &str {
        &self.values[0]
    }

    pub fn name(&self) -> &str {
        &self.values[1]
    }

    pub fn metric(&self) -> &str {
        &self.values[2]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedDataset {
    pub schema: MergedSchema,
    pub records: Vec<MergedRecord>,
}

impl MergedDataset {
    pub fn new(schema: MergedSchema) -> Self {
        Self {
            schema,
            records: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::new(MergedSchema {
            columns: Vec::new(),
            primary_sources: Vec::new(),
            name_source: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn value(&self, record: usize, column: &str) -> Option<&str> {
        let column = self.schema.column_index(column)?;
        self.records
            .get(record)?
            .values
            .get(column)
            .map(String::as_str)
    }

    /// Column name / value pairs of one record, in schema order.
    pub fn fields(&self, record: usize) -> Vec<(&str, &str)> {
        let Some(record) = self.records.get(record) else {
            return Vec::new();
        };
        self.schema
            .columns
            .iter()
            .map(String::as_str)
            .zip(record.values.iter().map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primary() -> Dataset {
        Dataset::new(vec![
            "Position".into(),
            "Name".into(),
            INTERNAL_KEY_COLUMN.into(),
            "PTS".into(),
            "Born_Date".into(),
        ])
    }

    #[test]
    fn schema_places_rank_name_metric_first() {
        let schema = MergedSchema::build(&primary(), "Name", &MergeLabels::default()).unwrap();
        assert_eq!(
            schema.columns,
            vec!["RK", "Name", "PTS", "Position", "Born_Date"]
        );
        assert_eq!(schema.primary_sources, vec![0, 4]);
        assert_eq!(schema.name_source, 1);
    }

    #[test]
    fn schema_rejects_colliding_labels() {
        let labels = MergeLabels {
            rank: "Name".into(),
            metric: "PTS".into(),
        };
        let err = MergedSchema::build(&primary(), "Name", &labels).unwrap_err();
        assert_eq!(err, ModelError::DuplicateOutputColumn("Name".into()));
    }

    #[test]
    fn schema_requires_name_column() {
        let err = MergedSchema::build(&primary(), "Player", &MergeLabels::default()).unwrap_err();
        assert!(matches!(err, ModelError::MissingColumn { .. }));
    }
}
