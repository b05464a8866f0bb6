//! Token-overlap fuzzy matching.
//!
//! A secondary name is scored against every candidate as the share of its
//! canonical tokens found in the candidate's token set. Candidates are scanned
//! in a fixed order, see [`FuzzyCandidateSet`].

use std::collections::HashSet;

use roster_model::{CanonicalKey, Dataset};
use roster_normalize::NormalizationRules;

pub const DEFAULT_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyCandidate {
    /// Primary display name as it appears in the dataset, trimmed.
    pub name: String,
    pub key: CanonicalKey,
    pub tokens: HashSet<String>,
}

/// Unique primary display names with their canonical token sets.
///
/// Names are deduplicated by their trimmed display text, not by canonical
/// key, and kept in the order their first occurrence appears in the primary
/// dataset (ascending row index). This order decides ties between candidates
/// with equal scores. Names whose canonical key is empty are skipped.
#[derive(Debug, Clone, Default)]
pub struct FuzzyCandidateSet {
    candidates: Vec<FuzzyCandidate>,
}

impl FuzzyCandidateSet {
    pub fn build(primary: &Dataset, name_column: usize, rules: &NormalizationRules) -> Self {
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for row in primary.rows_in_order() {
            let Some(name) = row.value(name_column) else {
                continue;
            };
            if !seen.insert(name) {
                continue;
            }
            let key = rules.normalize(name);
            if key.is_empty() {
                continue;
            }
            let tokens = key.tokens().map(str::to_string).collect();
            candidates.push(FuzzyCandidate {
                name: name.to_string(),
                key,
                tokens,
            });
        }
        Self { candidates }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FuzzyCandidate> {
        self.candidates.iter()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatch<'a> {
    pub candidate: &'a FuzzyCandidate,
    pub score: f64,
}

/// Best candidate for a raw secondary name, if any reaches `threshold`.
pub fn fuzzy_match<'a>(
    name: Option<&str>,
    candidates: &'a FuzzyCandidateSet,
    threshold: f64,
    rules: &NormalizationRules,
) -> Option<FuzzyMatch<'a>> {
    let key = roster_normalize::normalize_name(name, rules);
    fuzzy_match_key(&key, candidates, threshold)
}

/// Same as [`fuzzy_match`] for a name that is already normalized.
///
/// Ties keep the earlier candidate; the first candidate with a perfect score
/// is returned without looking further.
pub fn fuzzy_match_key<'a>(
    key: &CanonicalKey,
    candidates: &'a FuzzyCandidateSet,
    threshold: f64,
) -> Option<FuzzyMatch<'a>> {
    let tokens: Vec<&str> = key.tokens().collect();
    if tokens.is_empty() {
        return None;
    }
    let token_count = tokens.len() as f64;
    let min_matches = token_count * threshold;

    let mut best: Option<FuzzyMatch<'a>> = None;
    for candidate in candidates.iter() {
        if candidate.tokens.is_empty() {
            continue;
        }
        let matches = tokens
            .iter()
            .filter(|token| candidate.tokens.contains(**token))
            .count() as f64;
        if matches < min_matches {
            continue;
        }
        let score = matches / token_count;
        if best.is_none_or(|current| score > current.score) {
            best = Some(FuzzyMatch { candidate, score });
            if score >= 1.0 {
                break;
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(names: &[&str]) -> FuzzyCandidateSet {
        let mut dataset = Dataset::new(vec!["Name".to_string()]);
        for name in names {
            dataset.push_row(vec![name.to_string()]);
        }
        FuzzyCandidateSet::build(&dataset, 0, NormalizationRules::builtin())
    }

    fn best(name: &str, set: &FuzzyCandidateSet, threshold: f64) -> Option<String> {
        fuzzy_match(Some(name), set, threshold, NormalizationRules::builtin())
            .map(|found| found.candidate.name.clone())
    }

    #[test]
    fn half_overlap_is_below_default_threshold() {
        let set = candidates(&["Anthony Davis"]);
        assert_eq!(best("Anthony Edwards", &set, DEFAULT_THRESHOLD), None);
    }

    #[test]
    fn full_overlap_short_circuits_on_first_candidate() {
        let set = candidates(&["Davis Anthony", "Anthony Davis"]);
        let found = fuzzy_match(
            Some("Anthony Davis"),
            &set,
            DEFAULT_THRESHOLD,
            NormalizationRules::builtin(),
        )
        .unwrap();
        assert_eq!(found.candidate.name, "Davis Anthony");
        assert_eq!(found.score, 1.0);
    }

    #[test]
    fn ties_keep_first_seen_candidate() {
        let set = candidates(&["Tim Hardaway Sr Legend", "Tim Hardaway Junior"]);
        assert_eq!(
            best("Tim Hardaway Other", &set, 0.5),
            Some("Tim Hardaway Sr Legend".to_string())
        );
    }

    #[test]
    fn higher_score_beats_earlier_candidate() {
        let set = candidates(&["Jaren Jackson", "Jaren Jackson Junior Prospect"]);
        assert_eq!(
            best("Jaren Jackson Junior", &set, 0.6),
            Some("Jaren Jackson Junior Prospect".to_string())
        );
    }

    #[test]
    fn empty_key_never_matches() {
        let set = candidates(&["Jr."]);
        assert!(set.is_empty());
        assert_eq!(best("Sr.", &candidates(&["Any Body"]), 0.1), None);
        assert!(fuzzy_match(None, &set, 0.8, NormalizationRules::builtin()).is_none());
    }

    #[test]
    fn candidates_are_deduplicated_by_display_name() {
        let set = candidates(&["Kevin Durant", " Kevin Durant ", "KEVIN DURANT"]);
        let names: Vec<&str> = set.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Kevin Durant", "KEVIN DURANT"]);
    }

    #[test]
    fn duplicate_secondary_tokens_count_twice() {
        let set = candidates(&["Nene Hilario"]);
        let found = fuzzy_match(Some("Nene Nene X"), &set, 0.6, NormalizationRules::builtin())
            .unwrap();
        assert!((found.score - 2.0 / 3.0).abs() < 1e-9);
    }
}
