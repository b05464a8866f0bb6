//! Nearest-candidate hints for unmatched rows.
//!
//! Purely diagnostic: a suggestion never turns an unmatched row into a match.

use rapidfuzz::distance::jaro_winkler;
use roster_model::{CanonicalKey, NearestCandidate};

use crate::fuzzy::FuzzyCandidateSet;

/// Candidate whose canonical key is most similar to `key` (Jaro-Winkler).
pub fn nearest_candidate(key: &CanonicalKey, candidates: &FuzzyCandidateSet) -> Option<NearestCandidate> {
    if key.is_empty() {
        return None;
    }
    let mut best: Option<NearestCandidate> = None;
    for candidate in candidates.iter() {
        let similarity = jaro_winkler::similarity(key.as_str().chars(), candidate.key.as_str().chars());
        if best.as_ref().is_none_or(|current| similarity > current.similarity) {
            best = Some(NearestCandidate {
                name: candidate.name.clone(),
                similarity,
            });
        }
    }
    best
}
