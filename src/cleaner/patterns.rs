//! Suffix matching for file and directory names.
//!
//! A pattern is reduced to a plain suffix by removing every `*`; a name
//! matches when it ends with that suffix. No other glob syntax is expanded,
//! so `*.tmp` matches `a.tmp` and `x.tmp`, and `foo?` only matches names that
//! literally end in `foo?`.

use crate::error::{CleanerError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuffixPatterns {
    /// Patterns as given (for display/logging).
    patterns: Vec<String>,
    /// Wildcard-stripped suffixes used for matching.
    suffixes: Vec<String>,
}

impl SuffixPatterns {
    /// No patterns: every name matches.
    pub fn any() -> Self {
        Self::default()
    }

    /// Build from raw patterns. A pattern containing a path separator can
    /// never match a single name and is rejected.
    pub fn from_patterns<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result = Self::default();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            if pattern.contains('/') || pattern.contains('\\') {
                return Err(CleanerError::InvalidPattern {
                    pattern: pattern.to_string(),
                    reason: "patterns match entry names and cannot contain path separators"
                        .to_string(),
                });
            }
            result.patterns.push(pattern.to_string());
            result.suffixes.push(pattern.replace('*', ""));
        }
        Ok(result)
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// True when no patterns are configured or `name` ends with any suffix.
    pub fn matches(&self, name: &str) -> bool {
        self.suffixes.is_empty() || self.suffixes.iter().any(|suffix| name.ends_with(suffix.as_str()))
    }
}
