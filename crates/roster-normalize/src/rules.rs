//! Immutable pattern and lookup tables shared by the normalizer and formatters.
//!
//! A [`NormalizationRules`] value is built once at startup and passed by
//! reference. [`NormalizationRules::builtin`] returns a process-wide instance
//! carrying only the built-in tables.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RulesError};
use crate::plan::FormatPlan;

/// Known full-name spelling variants, applied after lower-casing.
const BUILTIN_ALIASES: &[(&str, &str)] = &[("shaquille oneal", "shaquille o'neal")];

/// Month names and abbreviations accepted by the date formatter.
const MONTHS: &[(&str, &str)] = &[
    ("january", "01"),
    ("february", "02"),
    ("march", "03"),
    ("april", "04"),
    ("may", "05"),
    ("june", "06"),
    ("july", "07"),
    ("august", "08"),
    ("september", "09"),
    ("october", "10"),
    ("november", "11"),
    ("december", "12"),
    ("jan", "01"),
    ("feb", "02"),
    ("mar", "03"),
    ("apr", "04"),
    ("jun", "06"),
    ("jul", "07"),
    ("aug", "08"),
    ("sep", "09"),
    ("oct", "10"),
    ("nov", "11"),
    ("dec", "12"),
];

/// Month abbreviations that spreadsheet exports substitute for feet/inch numbers.
const HEIGHT_MONTH_NUMBERS: &[(&str, &str)] = &[
    ("jan", "1"),
    ("feb", "2"),
    ("mar", "3"),
    ("apr", "4"),
    ("may", "5"),
    ("jun", "6"),
    ("jul", "7"),
    ("aug", "8"),
    ("sep", "9"),
    ("oct", "10"),
    ("nov", "11"),
    ("dec", "12"),
];

static BUILTIN: LazyLock<NormalizationRules> = LazyLock::new(NormalizationRules::default);

/// Repairs one month abbreviation on either side of a hyphen.
#[derive(Debug, Clone)]
pub(crate) struct HeightRepair {
    pub(crate) trailing: Regex,
    pub(crate) trailing_replacement: String,
    pub(crate) leading: Regex,
    pub(crate) leading_replacement: String,
}

#[derive(Debug, Clone)]
pub struct NormalizationRules {
    pub(crate) suffixes: Regex,
    pub(crate) punctuation: Regex,
    pub(crate) whitespace: Regex,
    pub(crate) aliases: Vec<(String, String)>,
    pub(crate) born_prefix: Regex,
    pub(crate) comma_space: Regex,
    pub(crate) month_day_year: Regex,
    pub(crate) iso_date: Regex,
    pub(crate) slash_date: Regex,
    pub(crate) height_repairs: Vec<HeightRepair>,
    pub(crate) height_month_words: Regex,
    pub(crate) height_month_abbrs: Regex,
    pub(crate) height_feet_inches: Regex,
    pub(crate) height_feet_only: Regex,
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in normalization pattern")
}

impl Default for NormalizationRules {
    fn default() -> Self {
        let height_repairs = HEIGHT_MONTH_NUMBERS
            .iter()
            .map(|(abbr, number)| HeightRepair {
                trailing: compile(&format!("(?i)-{abbr}")),
                trailing_replacement: format!("-{number}"),
                leading: compile(&format!("(?i){abbr}-")),
                leading_replacement: format!("{number}-"),
            })
            .collect();
        Self {
            suffixes: compile(r"\b(?:jr|sr|ii|iii|iv|v)\.?\b"),
            punctuation: compile(r"[^\w\s']"),
            whitespace: compile(r"\s+"),
            aliases: BUILTIN_ALIASES
                .iter()
                .map(|(variant, canonical)| (variant.to_string(), canonical.to_string()))
                .collect(),
            // "in" on its own, or before whitespace or the mis-decoded no-break-space artifact.
            born_prefix: compile(r"(?i)^in(?:\s*[ÂÀ]\s*|\s+|$)"),
            comma_space: compile(r",\s*"),
            month_day_year: compile(r"^(\w+)\s+(\d{1,2}),?\s*(\d{4})"),
            iso_date: compile(r"^\d{4}-\d{2}-\d{2}"),
            slash_date: compile(r"^(\d{1,2})/(\d{1,2})/(\d{4})"),
            height_repairs,
            height_month_words: compile(r"(?i)\b(?:month|months|mo|mos|m)\b"),
            height_month_abbrs: compile(
                r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\b",
            ),
            height_feet_inches: compile(r"(\d+)(?:\s*(?:'|ft|feet)[\s-]*|[\s-]+)(\d+)"),
            height_feet_only: compile(r"(\d+)\s*(?:'|ft|feet)?"),
        }
    }
}

impl NormalizationRules {
    /// Shared instance with the built-in tables only.
    pub fn builtin() -> &'static NormalizationRules {
        &BUILTIN
    }

    /// Adds alias substitutions after the built-in ones.
    ///
    /// Variants and canonical spellings are lower-cased and whitespace-collapsed.
    /// A canonical spelling may not contain any variant, so the alias step
    /// can never re-trigger on its own output.
    pub fn with_aliases<I, K, V>(mut self, aliases: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (variant, canonical) in aliases {
            let variant = fold_alias(variant.as_ref());
            let canonical = fold_alias(canonical.as_ref());
            if variant.is_empty() {
                return Err(RulesError::EmptyAlias);
            }
            match self.aliases.iter_mut().find(|(existing, _)| *existing == variant) {
                Some(entry) => entry.1 = canonical,
                None => self.aliases.push((variant, canonical)),
            }
        }
        self.check_aliases()?;
        Ok(self)
    }

    pub fn aliases(&self) -> &[(String, String)] {
        &self.aliases
    }

    /// Two-digit month number for a month name or abbreviation.
    pub fn month_number(&self, name: &str) -> Option<&'static str> {
        let lower = name.to_lowercase();
        MONTHS
            .iter()
            .find(|(month, _)| *month == lower)
            .map(|(_, number)| *number)
    }

    fn check_aliases(&self) -> Result<()> {
        for (variant, canonical) in &self.aliases {
            if let Some((contains, _)) = self
                .aliases
                .iter()
                .find(|(other, _)| canonical.contains(other.as_str()))
            {
                return Err(RulesError::SelfReferentialAlias {
                    variant: variant.clone(),
                    canonical: canonical.clone(),
                    contains: contains.clone(),
                });
            }
        }
        Ok(())
    }
}

fn fold_alias(raw: &str) -> String {
    raw.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// On-disk extension of the built-in rules.
///
/// ```json
/// { "aliases": { "kareem abduljabbar": "kareem abdul-jabbar" },
///   "format": { "date_columns": ["Born_Date"] } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesFile {
    pub aliases: BTreeMap<String, String>,
    pub format: Option<FormatPlan>,
}

impl RulesFile {
    /// Builds rules from the built-in tables plus this file's aliases.
    pub fn to_rules(&self) -> Result<NormalizationRules> {
        NormalizationRules::default().with_aliases(&self.aliases)
    }

    pub fn format_plan(&self) -> FormatPlan {
        self.format.clone().unwrap_or_default()
    }
}
