//! Page titles

use crate::page::namespace::{Namespace, NamespaceNames};
use serde::Serialize;
use std::fmt;

/// Suffixes of user-owned configuration subpages (`User:Name/common.js`)
const USER_CONFIG_SUFFIXES: &[&str] = &[".css", ".js", ".json"];

/// A page identity: namespace plus title text
///
/// Text is stored in display form (spaces, first letter upper-cased). For
/// pages in the Special namespace the text is the special page key, possibly
/// with a `/parameter` suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Title {
    namespace: Namespace,
    text: String,
}

impl Title {
    pub fn new(namespace: impl Into<Namespace>, text: &str) -> Self {
        Self {
            namespace: namespace.into(),
            text: normalize_text(text),
        }
    }

    /// Title in the Special namespace
    pub fn special(key: &str) -> Self {
        Self::new(Namespace::SPECIAL, key)
    }

    /// Parse a prefixed name such as `Help:Contents`
    ///
    /// A prefix that is not a known namespace name stays part of the text
    /// in the main namespace, as for `Foo: a story`. One leading colon is
    /// dropped, so `:Main Page` is `Main Page`.
    pub fn parse(prefixed: &str, names: &NamespaceNames) -> Self {
        let prefixed = prefixed.trim_start();
        let prefixed = prefixed.strip_prefix(':').unwrap_or(prefixed);
        if let Some((prefix, rest)) = prefixed.split_once(':')
            && !prefix.trim().is_empty()
            && prefix.trim().parse::<i32>().is_err()
            && let Some(ns) = names.parse(prefix)
        {
            return Self::new(ns, rest);
        }
        Self::new(Namespace::MAIN, prefixed)
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_special_page(&self) -> bool {
        self.namespace.is_special()
    }

    /// Special page key including any parameter, `None` for regular pages
    pub fn special_page_key(&self) -> Option<&str> {
        self.is_special_page().then_some(self.text.as_str())
    }

    /// Whether this is a user's own CSS/JS/JSON configuration subpage
    pub fn is_user_config_page(&self) -> bool {
        if self.namespace != Namespace::USER {
            return false;
        }
        let Some((_, subpage)) = self.text.split_once('/') else {
            return false;
        };
        USER_CONFIG_SUFFIXES
            .iter()
            .any(|suffix| subpage.len() > suffix.len() && subpage.ends_with(suffix))
    }

    /// `Namespace:Text`, or just the text in the main namespace
    pub fn prefixed_text(&self, names: &NamespaceNames) -> String {
        match names.name(self.namespace) {
            Some("") => self.text.clone(),
            Some(name) => format!("{}:{}", name, self.text),
            None => format!("{}:{}", self.namespace, self.text),
        }
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace == Namespace::MAIN {
            write!(f, "{}", self.text)
        } else {
            write!(f, "{}:{}", self.namespace, self.text)
        }
    }
}

/// Underscores to spaces, collapse runs of whitespace, upper-case first letter
pub(crate) fn normalize_text(text: &str) -> String {
    let spaced = text.replace('_', " ");
    let collapsed = spaced.split_whitespace().collect::<Vec<_>>().join(" ");
    ucfirst(&collapsed)
}

fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
