//! Exclusion rules value object
//!
//! Staged sites carry scratch files that must never reach a live host. A file
//! is excluded when its relative path contains any rule as a substring,
//! compared case-insensitively over every path component.

use std::path::Path;

/// Substrings excluded when no configuration overrides them.
pub const DEFAULT_EXCLUSIONS: &[&str] = &["_ignore_me_", "_error_"];

/// Case-insensitive substring rules applied to relative paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRules {
    /// Lowercased, non-empty, deduplicated
    rules: Vec<String>,
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUSIONS.iter().copied())
    }
}

impl ExclusionRules {
    /// Build a rule set. Empty strings are dropped since they would match everything.
    pub fn new<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = rules
            .into_iter()
            .map(|r| r.as_ref().trim().to_lowercase())
            .filter(|r| !r.is_empty())
            .collect();
        normalized.sort();
        normalized.dedup();
        Self { rules: normalized }
    }

    /// A rule set that excludes nothing.
    pub fn none() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the first rule matching `relative`, if any.
    pub fn matching_rule(&self, relative: &Path) -> Option<&str> {
        if self.rules.is_empty() {
            return None;
        }
        let haystack = normalize(relative);
        self.rules
            .iter()
            .find(|rule| haystack.contains(rule.as_str()))
            .map(String::as_str)
    }

    pub fn is_excluded(&self, relative: &Path) -> bool {
        self.matching_rule(relative).is_some()
    }
}

/// Lowercase with `/` separators so rules behave the same on every platform.
fn normalize(relative: &Path) -> String {
    relative
        .to_string_lossy()
        .replace('\\', "/")
        .to_lowercase()
}
