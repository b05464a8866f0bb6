//! Secondary (ranked metric) dataset conventions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::Result;

/// Column names of the secondary dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryColumns {
    pub rank: String,
    pub name: String,
    pub metric: String,
}

impl Default for SecondaryColumns {
    fn default() -> Self {
        Self {
            rank: "RK".to_string(),
            name: "Player".to_string(),
            metric: "PTS".to_string(),
        }
    }
}

/// Resolved positions of the secondary columns within one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecondaryLayout {
    pub rank: usize,
    pub name: usize,
    pub metric: usize,
}

impl SecondaryColumns {
    pub fn resolve(&self, dataset: &Dataset) -> Result<SecondaryLayout> {
        Ok(SecondaryLayout {
            rank: dataset.require_column(&self.rank)?,
            name: dataset.require_column(&self.name)?,
            metric: dataset.require_column(&self.metric)?,
        })
    }
}

/// A metric cell. Values that fail numeric parsing stay opaque text.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let digits: String = trimmed.chars().filter(|ch| *ch != ',').collect();
        match digits.parse::<f64>() {
            Ok(value) if value.is_finite() && !trimmed.is_empty() => Self::Number(value),
            _ => Self::Text(trimmed.to_string()),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number(_))
    }
}

impl fmt::Display for MetricValue {
    /// Numbers print with thousands separators, text prints verbatim.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                f.write_str(&group_thousands(*value as i64))
            }
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Sort key for rank cells: numeric ranks first in numeric order, then text.
pub fn rank_sort_key(raw: &str) -> (u8, i64, String) {
    match raw.trim().parse::<i64>() {
        Ok(rank) => (0, rank, String::new()),
        Err(_) => (1, 0, raw.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_parses_plain_and_grouped_numbers() {
        assert_eq!(MetricValue::parse("38652"), MetricValue::Number(38652.0));
        assert_eq!(MetricValue::parse("38,652"), MetricValue::Number(38652.0));
        assert_eq!(
            MetricValue::parse("n/a"),
            MetricValue::Text("n/a".to_string())
        );
        assert!(!MetricValue::parse("").is_numeric());
    }

    #[test]
    fn metric_display_groups_thousands() {
        assert_eq!(MetricValue::parse("38652").to_string(), "38,652");
        assert_eq!(MetricValue::parse("999").to_string(), "999");
        assert_eq!(MetricValue::parse("1234567").to_string(), "1,234,567");
        assert_eq!(MetricValue::parse("27.5").to_string(), "27.5");
    }

    #[test]
    fn rank_sort_key_orders_numbers_before_text() {
        let mut ranks = vec!["10", "2", "T-3", "1"];
        ranks.sort_by_key(|rank| rank_sort_key(rank));
        assert_eq!(ranks, vec!["1", "2", "10", "T-3"]);
    }
}
