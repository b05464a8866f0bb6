use serde::{Deserialize, Serialize};

/// Aggregate match counts for one merge run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchStats {
    pub total_secondary_rows: usize,
    pub total_primary_rows: usize,
    pub exact_matches: usize,
    pub fuzzy_matches: usize,
    pub total_matches: usize,
    pub unmatched: usize,
    pub match_percentage: f64,
}

impl MatchStats {
    pub fn compute(
        total_secondary_rows: usize,
        total_primary_rows: usize,
        exact_matches: usize,
        fuzzy_matches: usize,
        unmatched: usize,
    ) -> Self {
        let total_matches = exact_matches + fuzzy_matches;
        Self {
            total_secondary_rows,
            total_primary_rows,
            exact_matches,
            fuzzy_matches,
            total_matches,
            unmatched,
            match_percentage: match_percentage(total_matches, total_secondary_rows),
        }
    }
}

/// `matched / total * 100`, or `0.0` for an empty secondary dataset.
pub fn match_percentage(matched: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        matched as f64 / total as f64 * 100.0
    }
}
