//! Ordered tabular dataset.
//!
//! Column order is part of the contract: it drives the merged output order.
//! Every row remembers its original position so that first-seen policies can
//! be stated in terms of row index rather than container iteration order.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// One data row, aligned with [`Dataset::columns`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Zero-based position in the source dataset.
    pub index: usize,
    pub values: Vec<String>,
}

impl Row {
    /// Returns the trimmed cell value, or `None` when the cell is blank or absent.
    pub fn value(&self, column: usize) -> Option<&str> {
        let value = self.values.get(column)?.trim();
        if value.is_empty() { None } else { Some(value) }
    }

    /// Returns the raw cell value, empty when absent.
    pub fn raw(&self, column: usize) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding or truncating it to the column count.
    pub fn push_row(&mut self, mut values: Vec<String>) {
        values.resize(self.columns.len(), String::new());
        let index = self.rows.len();
        self.rows.push(Row { index, values });
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Looks up a column that the caller cannot proceed without.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| ModelError::MissingColumn {
                column: name.to_string(),
                available: self.columns.join(", "),
            })
    }

    /// Rows in ascending original row index.
    ///
    /// Rows are normally stored in that order already; the stable sort keeps
    /// the contract explicit for datasets assembled by hand.
    pub fn rows_in_order(&self) -> Vec<&Row> {
        let mut rows: Vec<&Row> = self.rows.iter().collect();
        rows.sort_by_key(|row| row.index);
        rows
    }

    /// Rewrites every cell of one column. Returns false when the column is absent.
    pub fn map_column<F>(&mut self, name: &str, mut transform: F) -> bool
    where
        F: FnMut(Option<&str>) -> String,
    {
        let Some(column) = self.column_index(name) else {
            return false;
        };
        for row in &mut self.rows {
            let current = row.values[column].trim();
            let input = if current.is_empty() {
                None
            } else {
                Some(current)
            };
            row.values[column] = transform(input);
        }
        true
    }

    /// Removes the named columns that exist and returns the ones removed.
    pub fn drop_columns<S: AsRef<str>>(&mut self, names: &[S]) -> Vec<String> {
        let doomed: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, column)| names.iter().any(|name| name.as_ref() == column.as_str()))
            .map(|(idx, _)| idx)
            .collect();
        if doomed.is_empty() {
            return Vec::new();
        }
        let mut removed = Vec::with_capacity(doomed.len());
        for &idx in doomed.iter().rev() {
            removed.push(self.columns.remove(idx));
            for row in &mut self.rows {
                row.values.remove(idx);
            }
        }
        removed.reverse();
        removed
    }

    /// Share of rows where `column` holds a non-blank value, in percent.
    pub fn completeness(&self, column: usize) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        let filled = self
            .rows
            .iter()
            .filter(|row| row.value(column).is_some())
            .count();
        filled as f64 / self.rows.len() as f64 * 100.0
    }
}
