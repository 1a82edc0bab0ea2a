//! Namespace identifiers and canonical names

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Numeric namespace identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(pub i32);

impl Namespace {
    pub const MEDIA: Namespace = Namespace(-2);
    pub const SPECIAL: Namespace = Namespace(-1);
    pub const MAIN: Namespace = Namespace(0);
    pub const TALK: Namespace = Namespace(1);
    pub const USER: Namespace = Namespace(2);
    pub const USER_TALK: Namespace = Namespace(3);
    pub const PROJECT: Namespace = Namespace(4);
    pub const PROJECT_TALK: Namespace = Namespace(5);
    pub const FILE: Namespace = Namespace(6);
    pub const FILE_TALK: Namespace = Namespace(7);
    pub const MEDIAWIKI: Namespace = Namespace(8);
    pub const MEDIAWIKI_TALK: Namespace = Namespace(9);
    pub const TEMPLATE: Namespace = Namespace(10);
    pub const TEMPLATE_TALK: Namespace = Namespace(11);
    pub const HELP: Namespace = Namespace(12);
    pub const HELP_TALK: Namespace = Namespace(13);
    pub const CATEGORY: Namespace = Namespace(14);
    pub const CATEGORY_TALK: Namespace = Namespace(15);

    pub const fn id(&self) -> i32 {
        self.0
    }

    pub const fn is_special(&self) -> bool {
        self.0 == Self::SPECIAL.0
    }

    /// Get all built-in namespaces
    pub fn builtin() -> &'static [(Namespace, &'static str)] {
        &[
            (Namespace::MEDIA, "Media"),
            (Namespace::SPECIAL, "Special"),
            (Namespace::MAIN, ""),
            (Namespace::TALK, "Talk"),
            (Namespace::USER, "User"),
            (Namespace::USER_TALK, "User talk"),
            (Namespace::PROJECT, "Project"),
            (Namespace::PROJECT_TALK, "Project talk"),
            (Namespace::FILE, "File"),
            (Namespace::FILE_TALK, "File talk"),
            (Namespace::MEDIAWIKI, "MediaWiki"),
            (Namespace::MEDIAWIKI_TALK, "MediaWiki talk"),
            (Namespace::TEMPLATE, "Template"),
            (Namespace::TEMPLATE_TALK, "Template talk"),
            (Namespace::HELP, "Help"),
            (Namespace::HELP_TALK, "Help talk"),
            (Namespace::CATEGORY, "Category"),
            (Namespace::CATEGORY_TALK, "Category talk"),
        ]
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for Namespace {
    fn from(id: i32) -> Self {
        Namespace(id)
    }
}

/// Namespace id <-> name lookup
///
/// Seeded with the built-in namespaces; extra namespaces are added from
/// configuration. Name lookup is case-insensitive and treats `_` like a space.
#[derive(Debug, Clone)]
pub struct NamespaceNames {
    by_id: HashMap<Namespace, String>,
    by_name: HashMap<String, Namespace>,
}

impl NamespaceNames {
    pub fn new() -> Self {
        let mut names = Self {
            by_id: HashMap::new(),
            by_name: HashMap::new(),
        };
        for (ns, name) in Namespace::builtin() {
            names.insert(*ns, name);
        }
        // "Main" is accepted in configuration for the unnamed namespace
        names.by_name.insert("main".to_string(), Namespace::MAIN);
        names
    }

    /// Register (or rename) a namespace
    pub fn insert(&mut self, ns: Namespace, name: &str) {
        let name = name.replace('_', " ");
        self.by_name.insert(name.to_lowercase(), ns);
        self.by_id.insert(ns, name);
    }

    /// Canonical display name; `None` for unknown ids
    pub fn name(&self, ns: Namespace) -> Option<&str> {
        self.by_id.get(&ns).map(String::as_str)
    }

    /// Resolve a namespace from a numeric id or a name
    pub fn parse(&self, s: &str) -> Option<Namespace> {
        let s = s.trim();
        if let Ok(id) = s.parse::<i32>() {
            return Some(Namespace(id));
        }
        self.by_name
            .get(&s.replace('_', " ").to_lowercase())
            .copied()
    }

    /// Number of known namespaces
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl Default for NamespaceNames {
    fn default() -> Self {
        Self::new()
    }
}
