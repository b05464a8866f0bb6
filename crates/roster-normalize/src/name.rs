//! Display name canonicalization.
//!
//! Steps, in order:
//! 1. absent input yields the empty key
//! 2. all-caps input is re-cased word by word
//! 3. lower-casing and diacritic folding
//! 4. generational suffixes (`jr`, `sr`, `ii`, `iii`, `iv`, `v`) removed as whole tokens
//! 5. alias substitution
//! 6. punctuation other than apostrophes removed
//! 7. whitespace collapsed and trimmed
//!
//! The pass is repeated until the output stops changing, which makes the
//! result idempotent even for inputs like `"J.R."` where removing punctuation
//! exposes a suffix token.

use roster_model::CanonicalKey;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::rules::NormalizationRules;

const MAX_PASSES: usize = 8;

/// Canonical comparison key for a display name.
pub fn normalize_name(name: Option<&str>, rules: &NormalizationRules) -> CanonicalKey {
    let Some(name) = name else {
        return CanonicalKey::empty();
    };
    let mut current = normalize_pass(name, rules);
    for _ in 1..MAX_PASSES {
        let next = normalize_pass(&current, rules);
        if next == current {
            break;
        }
        current = next;
    }
    CanonicalKey::from_normalized(current)
}

impl NormalizationRules {
    /// Shorthand for [`normalize_name`] on a present value.
    pub fn normalize(&self, name: &str) -> CanonicalKey {
        normalize_name(Some(name), self)
    }
}

fn normalize_pass(raw: &str, rules: &NormalizationRules) -> String {
    let trimmed = raw.trim();
    let recased = if is_all_caps(trimmed) {
        trimmed
            .split_whitespace()
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        trimmed.to_string()
    };

    let folded = fold_lowercase(&recased);
    let mut text = rules.suffixes.replace_all(&folded, "").into_owned();
    for (variant, canonical) in &rules.aliases {
        if text.contains(variant.as_str()) {
            text = text.replace(variant.as_str(), canonical);
        }
    }
    let text = rules.punctuation.replace_all(&text, "");
    let text = rules.whitespace.replace_all(&text, " ");
    text.trim().to_string()
}

/// True when the text has cased letters and none of them are lower-case.
fn is_all_caps(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn fold_lowercase(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> String {
        NormalizationRules::builtin().normalize(name).into_string()
    }

    #[test]
    fn absent_name_is_empty_key() {
        assert!(normalize_name(None, NormalizationRules::builtin()).is_empty());
        assert_eq!(key("   "), "");
    }

    #[test]
    fn all_caps_matches_mixed_case() {
        assert_eq!(key("LEBRON JAMES"), "lebron james");
        assert_eq!(key("LEBRON JAMES"), key("LeBron James"));
    }

    #[test]
    fn suffixes_are_stripped_as_whole_tokens() {
        assert_eq!(key("James Worthy Jr."), key("James Worthy"));
        assert_eq!(key("Gary Trent Jr"), "gary trent");
        assert_eq!(key("Glen Rice Sr."), "glen rice");
        assert_eq!(key("Otto Porter III"), "otto porter");
        assert_eq!(key("Jamal Murray"), "jamal murray");
        assert_eq!(key("Vince Carter"), "vince carter");
        assert_eq!(key("Ivica Zubac"), "ivica zubac");
    }

    #[test]
    fn alias_table_restores_apostrophe() {
        assert_eq!(key("Shaquille ONeal"), "shaquille o'neal");
        assert_eq!(key("Shaquille O'Neal"), "shaquille o'neal");
    }

    #[test]
    fn punctuation_and_whitespace_are_cleaned() {
        assert_eq!(key("  Karl-Anthony   Towns "), "karlanthony towns");
        assert_eq!(key("D'Angelo Russell"), "d'angelo russell");
        assert_eq!(key("P.J. Tucker"), "pj tucker");
    }

    #[test]
    fn diacritics_are_folded() {
        assert_eq!(key("Nikola Jokić"), "nikola jokic");
        assert_eq!(key("Luka Dončić"), key("Luka Doncic"));
    }

    #[test]
    fn suffix_exposed_by_punctuation_is_removed_on_later_pass() {
        assert_eq!(key("J.R."), "");
        assert_eq!(key("J.R. Smith"), "smith");
        assert_eq!(key(&key("J.R. Smith")), "smith");
    }
}
