//! Key normalization used for synonym matching.

use std::fmt;

/// A record key canonicalized for matching.
///
/// Normalization lowercases, trims, and replaces every run of whitespace or
/// hyphens with a single underscore. Only used for lookups; the mapped record
/// is keyed by canonical field names, never by normalized raw keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    pub fn new(raw: &str) -> Self {
        Self(normalize_key(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalizes a raw key: `" Birth  Weight-Grams "` becomes `"birth_weight_grams"`.
pub fn normalize_key(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    let mut in_separator_run = false;
    for ch in raw.trim().chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() || ch == '-' {
            if !in_separator_run {
                normalized.push('_');
                in_separator_run = true;
            }
        } else {
            normalized.push(ch);
            in_separator_run = false;
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(normalize_key("  APGAR1 "), "apgar1");
    }

    #[test]
    fn collapses_separator_runs() {
        assert_eq!(normalize_key("Birth  Weight"), "birth_weight");
        assert_eq!(normalize_key("heart-rate bpm"), "heart_rate_bpm");
        assert_eq!(normalize_key("prom - duration"), "prom_duration");
        assert_eq!(normalize_key("body\ttemp"), "body_temp");
    }

    #[test]
    fn keeps_existing_underscores() {
        assert_eq!(normalize_key("apgar_5_min"), "apgar_5_min");
        assert_eq!(normalize_key("already__doubled"), "already__doubled");
    }

    #[test]
    fn empty_key_stays_empty() {
        assert_eq!(NormalizedKey::new("   ").as_str(), "");
    }
}
