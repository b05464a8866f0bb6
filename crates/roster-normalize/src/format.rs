//! Best-effort field formatters.
//!
//! Every formatter is total: unrecognized input comes back as close to the
//! original as possible and absent input becomes the empty string.

use serde::{Deserialize, Serialize};

use crate::rules::NormalizationRules;

/// The field formatters available to a [`crate::FormatPlan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldFormatter {
    Date,
    Height,
    Location,
}

impl FieldFormatter {
    pub fn apply(self, value: Option<&str>, rules: &NormalizationRules) -> String {
        match self {
            Self::Date => format_date(value, rules),
            Self::Height => format_height(value, rules),
            Self::Location => format_location(value, rules),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Height => "height",
            Self::Location => "location",
        }
    }
}

/// Normalizes `Month Day, Year`, `YYYY-MM-DD` and `M/D/YYYY` to `YYYY-MM-DD`.
pub fn format_date(value: Option<&str>, rules: &NormalizationRules) -> String {
    let Some(value) = value else {
        return String::new();
    };
    let value = value.trim();

    if let Some(caps) = rules.month_day_year.captures(value)
        && let Some(month) = rules.month_number(&caps[1])
    {
        return format!("{}-{}-{:0>2}", &caps[3], month, &caps[2]);
    }
    if rules.iso_date.is_match(value) {
        return value.to_string();
    }
    if let Some(caps) = rules.slash_date.captures(value) {
        return format!("{}-{:0>2}-{:0>2}", &caps[3], &caps[1], &caps[2]);
    }
    value.to_string()
}

/// Strips the leading "in" of a birthplace and evens out spacing around commas.
pub fn format_location(value: Option<&str>, rules: &NormalizationRules) -> String {
    let Some(value) = value else {
        return String::new();
    };
    let text = rules.born_prefix.replace(value.trim(), "");
    let text = rules.whitespace.replace_all(&text, " ");
    let text = rules.comma_space.replace_all(&text, ", ");
    text.trim().to_string()
}

/// Normalizes imperial heights to `feet-inches`.
///
/// Values mangled by spreadsheet date auto-conversion (`6-Jun`, `Jul-0`)
/// are repaired first.
pub fn format_height(value: Option<&str>, rules: &NormalizationRules) -> String {
    let Some(value) = value else {
        return String::new();
    };
    let mut text = value.trim().to_string();
    for repair in &rules.height_repairs {
        text = repair
            .trailing
            .replace_all(&text, repair.trailing_replacement.as_str())
            .into_owned();
        text = repair
            .leading
            .replace_all(&text, repair.leading_replacement.as_str())
            .into_owned();
    }
    let text = rules.height_month_words.replace_all(&text, "");
    let text = rules.height_month_abbrs.replace_all(&text, "");

    if let Some(caps) = rules.height_feet_inches.captures(&text) {
        return format!("{}-{}", &caps[1], &caps[2]);
    }
    if let Some(caps) = rules.height_feet_only.captures(&text) {
        return format!("{}-0", &caps[1]);
    }
    rules.whitespace.replace_all(&text, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> &'static NormalizationRules {
        NormalizationRules::builtin()
    }

    fn date(value: &str) -> String {
        format_date(Some(value), rules())
    }

    fn height(value: &str) -> String {
        format_height(Some(value), rules())
    }

    fn location(value: &str) -> String {
        format_location(Some(value), rules())
    }

    #[test]
    fn date_formats() {
        assert_eq!(date("January 5, 1984"), "1984-01-05");
        assert_eq!(date("Dec 30 1984"), "1984-12-30");
        assert_eq!(date("  May 1, 2001 "), "2001-05-01");
        assert_eq!(date("1984-01-05"), "1984-01-05");
        assert_eq!(date("1/5/1984"), "1984-01-05");
        assert_eq!(date("12/30/1984"), "1984-12-30");
    }

    #[test]
    fn unrecognized_dates_pass_through() {
        assert_eq!(date("circa 1984"), "circa 1984");
        assert_eq!(date("Sept 5, 1984"), "Sept 5, 1984");
        assert_eq!(format_date(None, rules()), "");
    }

    #[test]
    fn location_prefix_and_commas() {
        assert_eq!(location("in Akron, Ohio"), "Akron, Ohio");
        assert_eq!(location("in\u{a0}Akron,Ohio"), "Akron, Ohio");
        assert_eq!(location("inÂ\u{a0}Akron,   Ohio"), "Akron, Ohio");
        assert_eq!(location("inÀ Paris , France"), "Paris , France");
        assert_eq!(location("Los   Angeles,California"), "Los Angeles, California");
        assert_eq!(location("Indianapolis, Indiana"), "Indianapolis, Indiana");
        assert_eq!(format_location(None, rules()), "");
    }

    #[test]
    fn bare_location_prefix_becomes_empty() {
        assert_eq!(location(" in "), "");
        assert_eq!(location("IN"), "");
        assert_eq!(location("Inglewood"), "Inglewood");
    }

    #[test]
    fn height_repairs_export_artifacts() {
        assert_eq!(height("6-Jun"), "6-6");
        assert_eq!(height("7-Feb"), "7-2");
        assert_eq!(height("Jul-0"), "7-0");
        assert_eq!(height("6-Oct"), "6-10");
    }

    #[test]
    fn height_patterns() {
        assert_eq!(height("6-6"), "6-6");
        assert_eq!(height("6' 9\""), "6-9");
        assert_eq!(height("6 ft 8 in"), "6-8");
        assert_eq!(height("6"), "6-0");
        assert_eq!(height("7 feet"), "7-0");
    }

    #[test]
    fn height_without_digits_loses_whitespace_only() {
        assert_eq!(height("tall  guy"), "tallguy");
        assert_eq!(height(""), "");
        assert_eq!(format_height(None, rules()), "");
    }

    #[test]
    fn formatter_dispatch() {
        assert_eq!(
            FieldFormatter::Date.apply(Some("1/5/1984"), rules()),
            "1984-01-05"
        );
        assert_eq!(FieldFormatter::Height.as_str(), "height");
    }
}
