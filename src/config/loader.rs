//! Configuration loader with layered sources
//!
//! Loads configuration from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (WIKI_LOCKDOWN_*)
//! 2. Configuration file (TOML)
//! 3. Default values (no restrictions)

use crate::config::types::{AppConfig, LockdownConfig};
use crate::error::ConfigError;
use crate::page::{Namespace, NamespaceNames};
use config::{Config, Environment, File, FileFormat};
use std::collections::HashMap;
use std::path::Path;

/// Default configuration file paths to check (in order)
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "wiki-lockdown.toml",
    ".wiki-lockdown.toml",
    "~/.config/wiki-lockdown/config.toml",
    "/etc/wiki-lockdown/config.toml",
];

/// Environment variable prefix, e.g. `WIKI_LOCKDOWN__LOGGING__LEVEL`
const ENV_PREFIX: &str = "WIKI_LOCKDOWN";

/// Load configuration from a TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(toml_str, FileFormat::Toml))
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Load configuration from files and environment
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        // Explicit path provided - must exist
        if !Path::new(path).exists() {
            return Err(ConfigError::Load(format!(
                "Configuration file not found: {}",
                path
            )));
        }
        builder = builder.add_source(File::new(path, FileFormat::Toml));
    } else {
        // Try default paths (first existing one wins)
        for path in DEFAULT_CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
                break;
            }
        }
    }

    // Double underscore (__) maps to nested keys (logging.level)
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Build the namespace name table, including configured extra namespaces
pub fn namespace_names(config: &LockdownConfig) -> Result<NamespaceNames, ConfigError> {
    let mut names = NamespaceNames::new();
    for (id, name) in &config.namespace_names {
        let id = id.trim().parse::<i32>().map_err(|_| ConfigError::Invalid {
            message: format!("lockdown.namespace_names key must be a number, got: {}", id),
        })?;
        if name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: format!("lockdown.namespace_names.{} must not be empty", id),
            });
        }
        names.insert(Namespace(id), name.trim());
    }
    Ok(names)
}

/// Resolve every `lockdown.namespaces` key and reject an action defined twice
/// for one namespace under different keys (`4` and `project`)
pub(crate) fn check_namespace_keys(
    config: &LockdownConfig,
    names: &NamespaceNames,
) -> Result<(), ConfigError> {
    let mut entries: Vec<_> = config.namespaces.iter().collect();
    entries.sort_by_key(|(key, _)| *key);

    let mut seen: HashMap<(Option<Namespace>, &str), &str> = HashMap::new();
    for (key, rules) in entries {
        let ns = if key == "*" {
            None
        } else {
            Some(names.parse(key).ok_or_else(|| ConfigError::UnknownNamespace {
                name: key.clone(),
                field: "lockdown.namespaces".to_string(),
            })?)
        };
        let mut actions: Vec<&String> = rules.keys().collect();
        actions.sort();
        for action in actions {
            if let Some(previous) = seen.insert((ns, action.as_str()), key.as_str()) {
                return Err(ConfigError::Invalid {
                    message: format!(
                        "lockdown.namespaces.{}.{} and lockdown.namespaces.{}.{} name the same namespace",
                        previous, action, key, action
                    ),
                });
            }
        }
    }
    Ok(())
}

/// Validate configuration values
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    let lockdown = &config.lockdown;
    let names = namespace_names(lockdown)?;

    check_namespace_keys(lockdown, &names)?;

    for (index, entry) in lockdown.special_pages.iter().enumerate() {
        if entry.name.trim().is_empty() {
            return Err(ConfigError::Missing {
                field: format!("lockdown.special_pages[{}].name", index),
            });
        }
    }

    for (index, alias) in lockdown.special_page_aliases.iter().enumerate() {
        if alias.alias.trim().is_empty() || alias.page.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: format!(
                    "lockdown.special_page_aliases[{}] needs both alias and page",
                    index
                ),
            });
        }
    }

    validate_patterns(
        &lockdown.read_whitelist_patterns,
        "lockdown.read_whitelist_patterns",
    )?;

    Ok(())
}

/// Validate that all patterns are valid regex
fn validate_patterns(patterns: &[String], field_path: &str) -> Result<(), ConfigError> {
    for pattern in patterns {
        if let Err(e) = regex::Regex::new(pattern) {
            return Err(ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                reason: format!("in {}: {}", field_path, e),
            });
        }
    }
    Ok(())
}
