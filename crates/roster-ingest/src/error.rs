//! Error types for roster loading and output.

use std::path::PathBuf;

use roster_normalize::RulesError;
use thiserror::Error;

/// Errors raised while reading an input file.
#[derive(Debug, Error)]
pub enum LoadError {
    // === File System Errors ===
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Errors ===
    /// Malformed CSV. `line` is 1-based when the parser reports a position.
    #[error("failed to parse CSV {path}{}: {message}", at_line(.line))]
    CsvParse {
        path: PathBuf,
        line: Option<u64>,
        message: String,
    },

    /// The file has no header row at all.
    #[error("no header row in {path}")]
    MissingHeader { path: PathBuf },

    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    // === Rules File Errors ===
    #[error("failed to parse rules file {path}: {source}")]
    RulesParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid rules in {path}: {source}")]
    InvalidRules {
        path: PathBuf,
        #[source]
        source: RulesError,
    },
}

/// Errors raised while persisting merge results.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Refusing to write a merged dataset without records.
    #[error("merged dataset is empty, refusing to write {path}")]
    EmptyMerge { path: PathBuf },

    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, LoadError>;

fn at_line(line: &Option<u64>) -> String {
    line.map(|line| format!(" at line {line}")).unwrap_or_default()
}
