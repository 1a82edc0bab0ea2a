//! Read whitelist matching
//!
//! Pages on the read whitelist are readable regardless of any namespace
//! restriction. Entries are exact prefixed names; patterns are regexes over
//! the same prefixed name.

use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;

/// Compiled read whitelist
#[derive(Debug, Default)]
pub struct ReadWhitelist {
    exact: HashSet<String>,
    patterns: Vec<CompiledPattern>,
}

#[derive(Debug)]
struct CompiledPattern {
    source: String,
    regex: Regex,
}

impl ReadWhitelist {
    /// Build a whitelist from exact page names and regex patterns
    pub fn new(exact: &[String], patterns: &[String]) -> Result<Self, ConfigError> {
        let mut compiled = Vec::with_capacity(patterns.len());

        for pattern in patterns {
            let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;

            compiled.push(CompiledPattern {
                source: pattern.clone(),
                regex,
            });
        }

        Ok(Self {
            exact: exact.iter().map(|name| name.replace('_', " ")).collect(),
            patterns: compiled,
        })
    }

    /// Create an empty whitelist (matches nothing)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if a prefixed page name is whitelisted
    pub fn matches(&self, prefixed_name: &str) -> bool {
        self.find_match(prefixed_name).is_some()
    }

    /// Check if a prefixed page name is whitelisted, returning the entry that matched
    pub fn find_match(&self, prefixed_name: &str) -> Option<&str> {
        if let Some(entry) = self.exact.get(prefixed_name) {
            return Some(entry.as_str());
        }
        self.patterns
            .iter()
            .find(|p| p.regex.is_match(prefixed_name))
            .map(|p| p.source.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.patterns.is_empty()
    }

    /// Number of exact entries plus patterns
    pub fn len(&self) -> usize {
        self.exact.len() + self.patterns.len()
    }
}
