//! Shared data types for roster reconciliation.
//!
//! - **dataset**: ordered tabular input with explicit row indices
//! - **key**: the canonical comparison key
//! - **secondary**: ranked-metric column conventions and metric parsing
//! - **merged**: merged schema, records and match kinds
//! - **stats** / **unmatched** / **outcome**: merge results

#![deny(unsafe_code)]

pub mod dataset;
pub mod error;
pub mod key;
pub mod merged;
pub mod outcome;
pub mod secondary;
pub mod stats;
pub mod unmatched;

pub use dataset::{Dataset, Row};
pub use error::{ModelError, Result};
pub use key::CanonicalKey;
pub use merged::{
    INTERNAL_KEY_COLUMN, MatchKind, MergeLabels, MergedDataset, MergedRecord, MergedSchema,
};
pub use outcome::MergeOutcome;
pub use secondary::{MetricValue, SecondaryColumns, SecondaryLayout, rank_sort_key};
pub use stats::{MatchStats, match_percentage};
pub use unmatched::{NearestCandidate, UnmatchedEntry};
