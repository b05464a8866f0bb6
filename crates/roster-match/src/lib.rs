//! Matching secondary roster rows to primary rows.
//!
//! - **index**: exact canonical-key lookup, first-seen row wins
//! - **fuzzy**: token-overlap scoring over unique primary names
//! - **suggest**: nearest-name hints for rows that stay unmatched
//! - **engine**: the per-row exact-then-fuzzy merge and its statistics

#![deny(unsafe_code)]

pub mod engine;
pub mod fuzzy;
pub mod index;
pub mod options;
pub mod suggest;

pub use engine::{MergeEngine, merge};
pub use fuzzy::{
    DEFAULT_THRESHOLD, FuzzyCandidate, FuzzyCandidateSet, FuzzyMatch, fuzzy_match, fuzzy_match_key,
};
pub use index::PrimaryIndex;
pub use options::{MergeColumns, MergeOptions};
pub use suggest::nearest_candidate;
