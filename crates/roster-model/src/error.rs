use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("column '{column}' not found (available: {available})")]
    MissingColumn { column: String, available: String },
    #[error("output column '{0}' would appear twice in the merged schema")]
    DuplicateOutputColumn(String),
    #[error("fuzzy threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f64),
}

pub type Result<T> = std::result::Result<T, ModelError>;
