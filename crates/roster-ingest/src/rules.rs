//! Rules-file loading.

use std::path::Path;

use roster_normalize::{FormatPlan, NormalizationRules, RulesFile};
use tracing::info;

use crate::error::{LoadError, Result};

pub fn read_rules_file(path: &Path) -> Result<RulesFile> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    serde_json::from_str(&text).map_err(|source| LoadError::RulesParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Normalization rules and format plan, from a rules file when one is given.
pub fn load_rules(path: Option<&Path>) -> Result<(NormalizationRules, FormatPlan)> {
    let Some(path) = path else {
        return Ok((NormalizationRules::default(), FormatPlan::default()));
    };
    let file = read_rules_file(path)?;
    let rules = file.to_rules().map_err(|source| LoadError::InvalidRules {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        aliases = rules.aliases().len(),
        custom_format = file.format.is_some(),
        "loaded rules file"
    );
    Ok((rules, file.format_plan()))
}
