use serde::{Deserialize, Serialize};

use crate::merged::MergedDataset;
use crate::stats::MatchStats;
use crate::unmatched::UnmatchedEntry;

/// Everything one merge run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeOutcome {
    pub merged: MergedDataset,
    pub unmatched: Vec<UnmatchedEntry>,
    pub stats: MatchStats,
}

impl MergeOutcome {
    /// The degenerate result for callers that collapse load failures.
    pub fn empty() -> Self {
        Self {
            merged: MergedDataset::empty(),
            unmatched: Vec::new(),
            stats: MatchStats::default(),
        }
    }

    /// True when nothing was merged and nothing was left unmatched.
    ///
    /// Distinguishing "no work done" from "ran with zero rows" requires
    /// looking at [`MatchStats::total_secondary_rows`] as well.
    pub fn is_empty(&self) -> bool {
        self.merged.is_empty() && self.unmatched.is_empty()
    }

    pub fn has_matches(&self) -> bool {
        !self.merged.is_empty()
    }
}
