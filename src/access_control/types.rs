//! Access control types
//!
//! Core types used by the lockdown evaluator.

use crate::message::DenialMessage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Wildcard used both as a key ("any namespace", "any action") and as a
/// value ("any group")
pub const WILDCARD: &str = "*";

/// Action name checked by the read whitelist and the search filters
pub const READ_ACTION: &str = "read";

/// Configured restriction for one subject
///
/// An absent entry (`Option::None` at the lookup site) means unrestricted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawGroupRule", into = "RawGroupRule")]
pub enum GroupRule {
    /// `"*"`: everyone, same as no entry
    Anyone,
    /// Allow-list in declaration order; empty means nobody
    Groups(Vec<String>),
}

impl GroupRule {
    pub fn nobody() -> Self {
        GroupRule::Groups(Vec::new())
    }

    pub fn groups<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_list(groups.into_iter().map(Into::into).collect())
    }

    /// A list containing the wildcard collapses to [`GroupRule::Anyone`]
    fn from_list(groups: Vec<String>) -> Self {
        if groups.iter().any(|g| g == WILDCARD) {
            return GroupRule::Anyone;
        }
        let mut seen = BTreeSet::new();
        GroupRule::Groups(
            groups
                .into_iter()
                .filter(|g| seen.insert(g.clone()))
                .collect(),
        )
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, GroupRule::Anyone)
    }

    pub fn is_deny_all(&self) -> bool {
        matches!(self, GroupRule::Groups(groups) if groups.is_empty())
    }

    /// Evaluate the rule against a requester's groups
    pub fn evaluate(&self, requester: &GroupSet) -> Decision {
        match self {
            GroupRule::Anyone => Decision::Allow,
            GroupRule::Groups(allowed) if allowed.is_empty() => Decision::DenyNoGroup,
            GroupRule::Groups(allowed) => {
                if requester.intersects(allowed) {
                    Decision::Allow
                } else {
                    Decision::DenyGroups {
                        groups: allowed.clone(),
                        count: allowed.len(),
                    }
                }
            }
        }
    }
}

/// Configuration form: `"*"`, `"group"` or `["a", "b"]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawGroupRule {
    One(String),
    Many(Vec<String>),
}

impl From<RawGroupRule> for GroupRule {
    fn from(raw: RawGroupRule) -> Self {
        match raw {
            RawGroupRule::One(group) => GroupRule::from_list(vec![group]),
            RawGroupRule::Many(groups) => GroupRule::from_list(groups),
        }
    }
}

impl From<GroupRule> for RawGroupRule {
    fn from(rule: GroupRule) -> Self {
        match rule {
            GroupRule::Anyone => RawGroupRule::One(WILDCARD.to_string()),
            GroupRule::Groups(groups) => RawGroupRule::Many(groups),
        }
    }
}

/// A requester's effective groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupSet(BTreeSet<String>);

impl GroupSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups every logged-in user implicitly holds
    pub fn logged_in<I, S>(explicit: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set: Self = explicit.into_iter().collect();
        set.insert(WILDCARD);
        set.insert("user");
        set
    }

    /// Groups of an anonymous visitor
    pub fn anonymous() -> Self {
        [WILDCARD].into_iter().collect()
    }

    pub fn insert(&mut self, group: impl Into<String>) -> bool {
        self.0.insert(group.into())
    }

    pub fn contains(&self, group: &str) -> bool {
        self.0.contains(group)
    }

    /// Whether any of `groups` is held
    pub fn intersects(&self, groups: &[String]) -> bool {
        groups.iter().any(|g| self.0.contains(g))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for GroupSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for GroupSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups: Vec<&str> = self.iter().collect();
        write!(f, "{{{}}}", groups.join(", "))
    }
}

/// Result of an access check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    /// Access is allowed
    Allow,
    /// The entry allows nobody
    DenyNoGroup,
    /// The requester holds none of the listed groups
    DenyGroups { groups: Vec<String>, count: usize },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn is_denied(&self) -> bool {
        !self.is_allowed()
    }

    /// Denial payload, `None` when allowed
    pub fn denial(&self) -> Option<DenialMessage> {
        match self {
            Decision::Allow => None,
            Decision::DenyNoGroup => Some(DenialMessage::no_group()),
            Decision::DenyGroups { groups, .. } => {
                Some(DenialMessage::missing_groups(groups.clone()))
            }
        }
    }

    /// Consume into the denial payload
    pub fn into_denial(self) -> Option<DenialMessage> {
        match self {
            Decision::Allow => None,
            Decision::DenyNoGroup => Some(DenialMessage::no_group()),
            Decision::DenyGroups { groups, .. } => Some(DenialMessage::missing_groups(groups)),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Allow => write!(f, "allow"),
            Decision::DenyNoGroup => write!(f, "deny (no group may)"),
            Decision::DenyGroups { groups, .. } => {
                write!(f, "deny (requires one of: {})", groups.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_from_toml_forms() {
        let rule: GroupRule = serde_json::from_str(r#""*""#).unwrap();
        assert_eq!(rule, GroupRule::Anyone);

        let rule: GroupRule = serde_json::from_str(r#"[]"#).unwrap();
        assert!(rule.is_deny_all());

        let rule: GroupRule = serde_json::from_str(r#""sysop""#).unwrap();
        assert_eq!(rule, GroupRule::Groups(vec!["sysop".to_string()]));

        let rule: GroupRule = serde_json::from_str(r#"["user", "*"]"#).unwrap();
        assert!(rule.is_unrestricted());
    }

    #[test]
    fn test_rule_dedups_keeping_order() {
        let rule = GroupRule::groups(["sysop", "bot", "sysop"]);
        assert_eq!(
            rule,
            GroupRule::Groups(vec!["sysop".to_string(), "bot".to_string()])
        );
    }

    #[test]
    fn test_evaluate() {
        let sysop = GroupSet::logged_in(["sysop"]);
        let user = GroupSet::logged_in(Vec::<String>::new());

        assert!(GroupRule::Anyone.evaluate(&user).is_allowed());
        assert_eq!(GroupRule::nobody().evaluate(&sysop), Decision::DenyNoGroup);
        assert!(GroupRule::groups(["sysop"]).evaluate(&sysop).is_allowed());
        assert_eq!(
            GroupRule::groups(["sysop"]).evaluate(&user),
            Decision::DenyGroups {
                groups: vec!["sysop".to_string()],
                count: 1
            }
        );
    }

    #[test]
    fn test_implicit_groups() {
        let anon = GroupSet::anonymous();
        assert!(anon.contains("*"));
        assert!(!anon.contains("user"));

        let user = GroupSet::logged_in(["editor"]);
        assert!(user.contains("user"));
        assert!(user.contains("editor"));
        assert_eq!(user.len(), 3);
    }

    #[test]
    fn test_decision_denial() {
        assert_eq!(Decision::Allow.denial(), None);
        assert_eq!(
            Decision::DenyNoGroup.denial(),
            Some(DenialMessage::no_group())
        );
    }
}
