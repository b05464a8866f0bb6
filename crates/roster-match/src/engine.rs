//! Merge engine: exact lookup first, then token-overlap fuzzy matching.

use std::time::Instant;

use rayon::prelude::*;
use roster_model::{
    CanonicalKey, Dataset, MatchKind, MatchStats, MergeOutcome, MergedDataset, MergedRecord,
    MergedSchema, NearestCandidate, Result, Row, SecondaryLayout, UnmatchedEntry,
};
use roster_normalize::NormalizationRules;
use tracing::{debug, info, info_span, trace};

use crate::fuzzy::{FuzzyCandidateSet, fuzzy_match_key};
use crate::index::PrimaryIndex;
use crate::options::{MergeColumns, MergeOptions};
use crate::suggest::nearest_candidate;

/// Outcome of matching a single secondary row.
#[derive(Debug, Clone)]
enum Decision<'a> {
    Matched { primary: &'a Row, kind: MatchKind },
    Unmatched {
        key: CanonicalKey,
        nearest: Option<NearestCandidate>,
    },
}

/// Read-only lookup structures shared by every row decision.
struct Lookup<'a> {
    index: PrimaryIndex<'a>,
    candidates: FuzzyCandidateSet,
}

#[derive(Debug, Clone)]
pub struct MergeEngine<'r> {
    rules: &'r NormalizationRules,
    options: MergeOptions,
    columns: MergeColumns,
}

impl<'r> MergeEngine<'r> {
    pub fn new(rules: &'r NormalizationRules) -> Self {
        Self {
            rules,
            options: MergeOptions::default(),
            columns: MergeColumns::default(),
        }
    }

    pub fn with_options(mut self, options: MergeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_columns(mut self, columns: MergeColumns) -> Self {
        self.columns = columns;
        self
    }

    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    pub fn columns(&self) -> &MergeColumns {
        &self.columns
    }

    /// Matches every secondary row against the primary dataset.
    ///
    /// Rows are decided independently and reassembled in secondary row-index
    /// order, so the parallel and sequential paths produce the same outcome.
    pub fn merge(&self, primary: &Dataset, secondary: &Dataset) -> Result<MergeOutcome> {
        self.options.validate()?;
        let span = info_span!(
            "merge",
            primary_rows = primary.row_count(),
            secondary_rows = secondary.row_count(),
            parallel = self.options.parallel
        );
        let _guard = span.enter();
        let start = Instant::now();

        let name_column = primary.require_column(&self.columns.primary_name)?;
        let layout = self.columns.secondary.resolve(secondary)?;
        let schema = MergedSchema::build(primary, &self.columns.primary_name, &self.columns.labels())?;

        let lookup = Lookup {
            index: PrimaryIndex::build(primary, name_column, self.rules),
            candidates: FuzzyCandidateSet::build(primary, name_column, self.rules),
        };
        debug!(
            indexed_keys = lookup.index.len(),
            key_collisions = lookup.index.collisions(),
            fuzzy_candidates = lookup.candidates.len(),
            "built primary lookup"
        );

        let rows = secondary.rows_in_order();
        let decisions: Vec<Decision<'_>> = if self.options.parallel {
            rows.par_iter()
                .map(|row| self.decide(row, &layout, &lookup))
                .collect()
        } else {
            rows.iter()
                .map(|row| self.decide(row, &layout, &lookup))
                .collect()
        };

        let mut merged = MergedDataset::new(schema);
        let mut unmatched = Vec::new();
        let (mut exact, mut fuzzy) = (0usize, 0usize);
        for (row, decision) in rows.iter().zip(decisions) {
            match decision {
                Decision::Matched {
                    primary: matched,
                    kind,
                } => {
                    match kind {
                        MatchKind::Exact => exact += 1,
                        MatchKind::Fuzzy => fuzzy += 1,
                    }
                    let record = assemble(&merged.schema, row, &layout, matched, kind);
                    merged.records.push(record);
                }
                Decision::Unmatched { key, nearest } => unmatched.push(UnmatchedEntry {
                    secondary_row: row.index,
                    name: cell(row, layout.name),
                    rank: cell(row, layout.rank),
                    metric: cell(row, layout.metric),
                    canonical_key: key,
                    nearest,
                }),
            }
        }

        let stats = MatchStats::compute(
            secondary.row_count(),
            primary.row_count(),
            exact,
            fuzzy,
            unmatched.len(),
        );
        info!(
            exact_matches = stats.exact_matches,
            fuzzy_matches = stats.fuzzy_matches,
            unmatched = stats.unmatched,
            match_percentage = stats.match_percentage,
            duration_ms = start.elapsed().as_millis(),
            "merge complete"
        );
        Ok(MergeOutcome {
            merged,
            unmatched,
            stats,
        })
    }

    fn decide<'a>(&self, row: &Row, layout: &SecondaryLayout, lookup: &Lookup<'a>) -> Decision<'a> {
        let key = roster_normalize::normalize_name(row.value(layout.name), self.rules);

        if let Some(primary) = lookup.index.get(&key) {
            trace!(row = row.index, key = %key, "exact match");
            return Decision::Matched {
                primary,
                kind: MatchKind::Exact,
            };
        }

        if let Some(found) = fuzzy_match_key(&key, &lookup.candidates, self.options.threshold) {
            let candidate_key = self.rules.normalize(&found.candidate.name);
            if let Some(primary) = lookup.index.get(&candidate_key) {
                trace!(
                    row = row.index,
                    key = %key,
                    candidate = %found.candidate.name,
                    score = found.score,
                    "fuzzy match"
                );
                return Decision::Matched {
                    primary,
                    kind: MatchKind::Fuzzy,
                };
            }
        }

        let nearest = if self.options.suggest_unmatched {
            nearest_candidate(&key, &lookup.candidates)
        } else {
            None
        };
        trace!(row = row.index, key = %key, "unmatched");
        Decision::Unmatched { key, nearest }
    }
}

/// Merges with the built-in rules, default columns and default options.
pub fn merge(primary: &Dataset, secondary: &Dataset) -> Result<MergeOutcome> {
    MergeEngine::new(NormalizationRules::builtin()).merge(primary, secondary)
}

fn cell(row: &Row, column: usize) -> String {
    row.value(column).unwrap_or_default().to_string()
}

fn assemble(
    schema: &MergedSchema,
    secondary: &Row,
    layout: &SecondaryLayout,
    primary: &Row,
    kind: MatchKind,
) -> MergedRecord {
    let mut values = Vec::with_capacity(schema.columns.len());
    values.push(cell(secondary, layout.rank));
    values.push(primary.raw(schema.name_source).to_string());
    values.push(cell(secondary, layout.metric));
    values.extend(
        schema
            .primary_sources
            .iter()
            .map(|&column| primary.raw(column).to_string()),
    );
    MergedRecord {
        secondary_row: secondary.index,
        primary_row: primary.index,
        kind,
        values,
    }
}
