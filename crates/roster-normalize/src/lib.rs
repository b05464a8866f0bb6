//! Name canonicalization and field formatting for scraped roster data.
//!
//! [`normalize_name`] turns a display name into a [`CanonicalKey`] used by
//! both the exact index and the fuzzy matcher. The formatters in [`format`]
//! clean up dates, heights and birthplaces, and a [`FormatPlan`] applies
//! them to a primary dataset in place.

#![deny(unsafe_code)]

pub mod error;
pub mod format;
pub mod name;
pub mod plan;
pub mod rules;

pub use error::{Result, RulesError};
pub use format::{FieldFormatter, format_date, format_height, format_location};
pub use name::normalize_name;
pub use plan::{FormatPlan, FormatReport, FormattedColumn};
pub use roster_model::CanonicalKey;
pub use rules::{NormalizationRules, RulesFile};
