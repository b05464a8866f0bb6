use roster_model::{MergeLabels, ModelError, Result, SecondaryColumns};
use serde::{Deserialize, Serialize};

use crate::fuzzy::DEFAULT_THRESHOLD;

/// Tunables for one merge run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Minimum share of secondary tokens a fuzzy candidate must contain.
    pub threshold: f64,
    /// Decide rows on the rayon pool. Results are identical either way.
    pub parallel: bool,
    /// Attach the nearest primary name to every unmatched row.
    pub suggest_unmatched: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            parallel: false,
            suggest_unmatched: false,
        }
    }
}

impl MergeOptions {
    pub fn validate(&self) -> Result<()> {
        if self.threshold > 0.0 && self.threshold <= 1.0 {
            Ok(())
        } else {
            Err(ModelError::InvalidThreshold(self.threshold))
        }
    }
}

/// Which columns to read from each dataset and how to label the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeColumns {
    pub primary_name: String,
    pub secondary: SecondaryColumns,
    /// Output labels for rank and metric; the secondary column names when unset.
    pub labels: Option<MergeLabels>,
}

impl Default for MergeColumns {
    fn default() -> Self {
        Self {
            primary_name: "Name".to_string(),
            secondary: SecondaryColumns::default(),
            labels: None,
        }
    }
}

impl MergeColumns {
    pub fn labels(&self) -> MergeLabels {
        self.labels.clone().unwrap_or_else(|| MergeLabels {
            rank: self.secondary.rank.clone(),
            metric: self.secondary.metric.clone(),
        })
    }
}
