//! Configuration loading tests

use wiki_lockdown::access_control::GroupRule;
use wiki_lockdown::config::{LogFormat, load_config_from_str};
use wiki_lockdown::error::ConfigError;

const MINIMAL_CONFIG: &str = r#"
[lockdown.namespaces.0]
read = ["user"]
"#;

const FULL_CONFIG: &str = r#"
[logging]
level = "debug"
format = "json"

[lockdown]
read_whitelist = ["Main Page", "Special:UserLogin"]
read_whitelist_patterns = ["^Help:"]

[lockdown.namespace_names]
100 = "Portal"
101 = "Portal talk"

[lockdown.namespaces.0]
read = ["user"]
edit = []

[lockdown.namespaces.project]
"*" = ["sysop"]

[lockdown.namespaces."*"]
move = "*"

[lockdown.namespaces.portal]
edit = ["editor", "sysop"]

[[lockdown.special_pages]]
name = "Export"
groups = ["sysop", "bureaucrat"]

[[lockdown.special_pages]]
name = "Listusers"
groups = []

[[lockdown.special_page_aliases]]
alias = "ListUsers"
page = "Listusers"

[lockdown.actions]
history = ["user"]
delete = "sysop"
"#;

#[test]
fn test_minimal_config() {
    let config = load_config_from_str(MINIMAL_CONFIG).unwrap();

    assert_eq!(
        config.lockdown.namespaces["0"]["read"],
        GroupRule::groups(["user"])
    );
    assert!(config.lockdown.special_pages.is_empty());
    assert!(config.lockdown.actions.is_empty());
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_full_config() {
    let config = load_config_from_str(FULL_CONFIG).unwrap();

    // Logging
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);

    // Whitelist
    assert_eq!(
        config.lockdown.read_whitelist,
        vec!["Main Page", "Special:UserLogin"]
    );
    assert_eq!(config.lockdown.read_whitelist_patterns, vec!["^Help:"]);

    // Namespaces
    let main = &config.lockdown.namespaces["0"];
    assert_eq!(main["read"], GroupRule::groups(["user"]));
    assert!(main["edit"].is_deny_all());
    assert!(config.lockdown.namespaces["*"]["move"].is_unrestricted());
    assert_eq!(config.lockdown.namespace_names["100"], "Portal");

    // Special pages keep declaration order
    let names: Vec<&str> = config
        .lockdown
        .special_pages
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["Export", "Listusers"]);
    assert!(config.lockdown.special_pages[1].groups.is_deny_all());
    assert_eq!(config.lockdown.special_page_aliases[0].alias, "ListUsers");

    // Actions
    assert_eq!(
        config.lockdown.actions["delete"],
        GroupRule::groups(["sysop"])
    );
}

#[test]
fn test_full_config_builds_evaluator() {
    use wiki_lockdown::access_control::{GroupSet, LockdownEvaluator};
    use wiki_lockdown::page::{Namespace, Title};

    let config = load_config_from_str(FULL_CONFIG).unwrap();
    let evaluator = LockdownEvaluator::new(&config.lockdown).unwrap();

    let portal = Title::new(Namespace(100), "Welcome");
    let editor = GroupSet::logged_in(["editor"]);
    assert!(evaluator.resolve(&portal, "edit", &editor).is_allowed());
    assert_eq!(
        portal.prefixed_text(evaluator.names()),
        "Portal:Welcome"
    );
}

#[test]
fn test_invalid_whitelist_pattern() {
    let config_str = r#"
[lockdown]
read_whitelist_patterns = ["[invalid"]
"#;

    let result = load_config_from_str(config_str);
    assert!(matches!(
        result.unwrap_err(),
        ConfigError::InvalidPattern { .. }
    ));
}

#[test]
fn test_unknown_namespace_name() {
    let config_str = r#"
[lockdown.namespaces.nowhere]
read = []
"#;

    let result = load_config_from_str(config_str);
    assert!(matches!(
        result.unwrap_err(),
        ConfigError::UnknownNamespace { .. }
    ));
}

#[test]
fn test_namespace_defined_under_id_and_name() {
    let config_str = r#"
[lockdown.namespaces.4]
read = []

[lockdown.namespaces.project]
read = ["sysop"]
"#;

    // Same outcome on every load, whichever key the map yields first
    for _ in 0..20 {
        let err = load_config_from_str(config_str).unwrap_err();
        match err {
            ConfigError::Invalid { message } => {
                assert!(message.contains("lockdown.namespaces.4.read"));
                assert!(message.contains("lockdown.namespaces.project.read"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn test_malformed_toml() {
    let result = load_config_from_str("[lockdown\nnamespaces = ");
    assert!(matches!(result.unwrap_err(), ConfigError::Load(_)));
}

#[test]
fn test_special_page_missing_groups() {
    let config_str = r#"
[[lockdown.special_pages]]
name = "Export"
"#;

    assert!(load_config_from_str(config_str).is_err());
}

#[test]
#[serial_test::serial]
fn test_load_config_from_file() {
    use std::fs;
    use wiki_lockdown::config::load_config;

    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("lockdown.toml");
    fs::write(&config_path, FULL_CONFIG).unwrap();

    let config = load_config(Some(config_path.to_str().unwrap())).unwrap();
    assert_eq!(config.lockdown.special_pages.len(), 2);
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
#[serial_test::serial]
fn test_missing_explicit_file() {
    use wiki_lockdown::config::load_config;

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let result = load_config(Some(missing.to_str().unwrap()));
    assert!(matches!(result.unwrap_err(), ConfigError::Load(_)));
}

#[test]
#[serial_test::serial]
fn test_env_overrides_file() {
    use std::env;
    use std::fs;
    use wiki_lockdown::config::load_config;

    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("lockdown.toml");
    fs::write(
        &config_path,
        r#"
[logging]
level = "info"
"#,
    )
    .unwrap();

    unsafe {
        env::set_var("WIKI_LOCKDOWN__LOGGING__LEVEL", "trace");
    }

    let config = load_config(Some(config_path.to_str().unwrap()));

    unsafe {
        env::remove_var("WIKI_LOCKDOWN__LOGGING__LEVEL");
    }

    assert_eq!(config.unwrap().logging.level, "trace");
}
