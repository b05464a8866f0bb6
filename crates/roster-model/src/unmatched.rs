use serde::{Deserialize, Serialize};

use crate::key::CanonicalKey;

/// Closest primary name for an unmatched row. Diagnostic only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestCandidate {
    pub name: String,
    pub similarity: f64,
}

/// A secondary row that matched neither exactly nor fuzzily.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnmatchedEntry {
    pub secondary_row: usize,
    pub name: String,
    pub rank: String,
    pub metric: String,
    pub canonical_key: CanonicalKey,
    pub nearest: Option<NearestCandidate>,
}
