use thiserror::Error;

/// Errors raised while building a [`crate::NormalizationRules`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("alias variant is empty after normalization")]
    EmptyAlias,
    #[error("alias '{variant}' -> '{canonical}': canonical spelling contains alias variant '{contains}'")]
    SelfReferentialAlias {
        variant: String,
        canonical: String,
        contains: String,
    },
}

pub type Result<T> = std::result::Result<T, RulesError>;
