//! Denial messages
//!
//! The evaluator never builds user-facing text itself. A denial carries a
//! [`DenialMessage`] (message key plus parameters) which the host renders via
//! a [`MessageFormatter`], with group names turned into links by a
//! [`GroupLinker`]. Plain-text defaults are provided for standalone use.

use serde::Serialize;
use std::fmt;

/// Message key for "nobody may do this"
pub const MSG_NO_GROUP: &str = "badaccess-group0";

/// Message key for "you must belong to one of these groups"
pub const MSG_GROUPS: &str = "badaccess-groups";

/// Structured payload of a denial
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "key")]
pub enum DenialMessage {
    /// The entry is configured with an empty allow-list
    #[serde(rename = "badaccess-group0")]
    NoGroup,
    /// The requester shares no group with the allow-list
    #[serde(rename = "badaccess-groups")]
    Groups {
        /// Allow-list in declaration order
        groups: Vec<String>,
        /// Number of groups in the allow-list
        count: usize,
    },
}

impl DenialMessage {
    pub fn no_group() -> Self {
        DenialMessage::NoGroup
    }

    pub fn missing_groups(groups: Vec<String>) -> Self {
        let count = groups.len();
        DenialMessage::Groups { groups, count }
    }

    /// Message key understood by the host's localisation layer
    pub fn key(&self) -> &'static str {
        match self {
            DenialMessage::NoGroup => MSG_NO_GROUP,
            DenialMessage::Groups { .. } => MSG_GROUPS,
        }
    }

    /// Required groups, empty for [`DenialMessage::NoGroup`]
    pub fn groups(&self) -> &[String] {
        match self {
            DenialMessage::NoGroup => &[],
            DenialMessage::Groups { groups, .. } => groups,
        }
    }

    /// Render with the given collaborators
    pub fn render(&self, formatter: &dyn MessageFormatter, linker: &dyn GroupLinker) -> String {
        match self {
            DenialMessage::NoGroup => formatter.format(MSG_NO_GROUP, &[]),
            DenialMessage::Groups { groups, count } => {
                let links: Vec<String> = groups.iter().map(|g| linker.group_link(g)).collect();
                formatter.format(
                    MSG_GROUPS,
                    &[formatter.comma_list(&links), count.to_string()],
                )
            }
        }
    }
}

impl fmt::Display for DenialMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialMessage::NoGroup => write!(f, "{}", MSG_NO_GROUP),
            DenialMessage::Groups { groups, count } => {
                write!(f, "{} ({}: {})", MSG_GROUPS, count, groups.join(", "))
            }
        }
    }
}

/// Localisation collaborator
pub trait MessageFormatter {
    /// Format a message key with positional parameters
    fn format(&self, key: &str, params: &[String]) -> String;

    /// Join items into a language-specific list
    fn comma_list(&self, items: &[String]) -> String {
        items.join(", ")
    }
}

/// Renders a group name, usually as a link to the group's description page
pub trait GroupLinker {
    fn group_link(&self, group: &str) -> String;
}

/// English plain-text formatter
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainFormatter;

impl MessageFormatter for PlainFormatter {
    fn format(&self, key: &str, params: &[String]) -> String {
        match (key, params) {
            (MSG_NO_GROUP, _) => {
                "You are not allowed to execute the action you have requested.".to_string()
            }
            (MSG_GROUPS, [list, count]) if count == "1" => {
                format!("The action you have requested is limited to users in the group: {list}.")
            }
            (MSG_GROUPS, [list, _]) => format!(
                "The action you have requested is limited to users in one of the groups: {list}."
            ),
            _ => format!("<{key}>"),
        }
    }
}

/// Links groups to `Project:<Group>` pages in wikitext
#[derive(Debug, Clone)]
pub struct WikiGroupLinker {
    prefix: String,
}

impl WikiGroupLinker {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for WikiGroupLinker {
    fn default() -> Self {
        Self::new("Project:")
    }
}

impl GroupLinker for WikiGroupLinker {
    fn group_link(&self, group: &str) -> String {
        let mut chars = group.chars();
        let page = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        format!("[[{}{}|{}]]", self.prefix, page, group)
    }
}

/// Renders group names verbatim
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainGroupLinker;

impl GroupLinker for PlainGroupLinker {
    fn group_link(&self, group: &str) -> String {
        group.to_string()
    }
}
