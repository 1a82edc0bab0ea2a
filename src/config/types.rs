//! Configuration types for wiki-lockdown
//!
//! This module defines the configuration structure that can be loaded from
//! TOML files and/or environment variables.

use crate::access_control::GroupRule;
use serde::Deserialize;
use std::collections::HashMap;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Lockdown tables
    pub lockdown: LockdownConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Lockdown configuration
///
/// Every table is optional. A subject without an entry is unrestricted; an
/// entry with an empty list allows nobody.
///
/// ```toml
/// [lockdown.namespaces.project]
/// "*" = ["sysop"]
///
/// [lockdown.namespaces."*"]
/// edit = ["user"]
///
/// [[lockdown.special_pages]]
/// name = "Export"
/// groups = ["sysop", "bureaucrat"]
///
/// [lockdown.actions]
/// history = ["user"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LockdownConfig {
    /// Namespace (id, name or `*`) -> action (or `*`) -> groups
    pub namespaces: HashMap<String, HashMap<String, GroupRule>>,

    /// Special page restrictions, first matching entry wins
    pub special_pages: Vec<SpecialPageConfig>,

    /// Alternative special page names
    pub special_page_aliases: Vec<SpecialPageAlias>,

    /// Dispatched action -> groups
    pub actions: HashMap<String, GroupRule>,

    /// Prefixed page names always readable
    pub read_whitelist: Vec<String>,

    /// Regexes over prefixed page names always readable
    pub read_whitelist_patterns: Vec<String>,

    /// Extra namespaces: id -> canonical name
    pub namespace_names: HashMap<String, String>,
}

/// One special page entry
#[derive(Debug, Clone, Deserialize)]
pub struct SpecialPageConfig {
    /// Special page name, e.g. `Export`
    pub name: String,

    /// Permitted groups
    pub groups: GroupRule,
}

/// Alternative name for a special page
#[derive(Debug, Clone, Deserialize)]
pub struct SpecialPageAlias {
    pub alias: String,
    pub page: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (pretty, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// JSON structured output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.lockdown.namespaces.is_empty());
        assert!(config.lockdown.special_pages.is_empty());
        assert!(config.lockdown.actions.is_empty());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_deserialize_log_format() {
        let format: LogFormat = serde_json::from_str(r#""json""#).unwrap();
        assert_eq!(format, LogFormat::Json);

        let format: LogFormat = serde_json::from_str(r#""pretty""#).unwrap();
        assert_eq!(format, LogFormat::Pretty);
    }

    #[test]
    fn test_deserialize_special_page_entry() {
        let json = r#"{"name": "Export", "groups": ["sysop", "bureaucrat"]}"#;
        let entry: SpecialPageConfig = serde_json::from_str(json).unwrap();
        assert_eq!(entry.name, "Export");
        assert_eq!(entry.groups, GroupRule::groups(["sysop", "bureaucrat"]));
    }

    #[test]
    fn test_deserialize_namespace_table() {
        let json = r#"{"namespaces": {"0": {"read": []}, "*": {"edit": "*"}}}"#;
        let config: LockdownConfig = serde_json::from_str(json).unwrap();
        assert!(config.namespaces["0"]["read"].is_deny_all());
        assert!(config.namespaces["*"]["edit"].is_unrestricted());
    }
}
