//! Exact-match index over primary rows.

use std::collections::HashMap;

use roster_model::{CanonicalKey, Dataset, Row};
use roster_normalize::NormalizationRules;

/// Canonical key to primary row lookup.
///
/// Rows are visited in ascending row index and the first row to produce a
/// key keeps it; later rows with the same key stay in the dataset but are
/// not reachable through the index.
#[derive(Debug, Clone, Default)]
pub struct PrimaryIndex<'a> {
    rows: HashMap<CanonicalKey, &'a Row>,
    collisions: usize,
}

impl<'a> PrimaryIndex<'a> {
    pub fn build(primary: &'a Dataset, name_column: usize, rules: &NormalizationRules) -> Self {
        let mut index = Self::default();
        for row in primary.rows_in_order() {
            let key = match row.value(name_column) {
                Some(name) => rules.normalize(name),
                None => continue,
            };
            if key.is_empty() {
                continue;
            }
            if index.rows.contains_key(&key) {
                index.collisions += 1;
                tracing::trace!(row = row.index, key = %key, "duplicate primary key ignored");
                continue;
            }
            index.rows.insert(key, row);
        }
        index
    }

    pub fn get(&self, key: &CanonicalKey) -> Option<&'a Row> {
        if key.is_empty() {
            return None;
        }
        self.rows.get(key).copied()
    }

    pub fn contains(&self, key: &CanonicalKey) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Primary rows whose key was already taken by an earlier row.
    pub fn collisions(&self) -> usize {
        self.collisions
    }
}
