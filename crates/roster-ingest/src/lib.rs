//! Roster file boundary: CSV input, rules files, merge outputs and
//! data-quality checks.

#![deny(unsafe_code)]

pub mod checks;
pub mod csv_table;
pub mod error;
pub mod output;
pub mod rules;

pub use checks::{
    CheckResult, CheckStatus, check_merged, check_merged_table, check_primary, check_secondary,
};
pub use csv_table::{parse_dataset, read_dataset, read_dataset_with_columns, require_columns};
pub use error::{LoadError, OutputError, Result};
pub use output::{
    MERGED_FILE, OutputPaths, STATS_FILE, UNMATCHED_FILE, write_merged, write_merged_csv,
    write_stats_json, write_unmatched, write_unmatched_csv,
};
pub use rules::{load_rules, read_rules_file};
