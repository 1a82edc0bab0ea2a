//! Lockdown evaluator
//!
//! Implements the three-tier namespace lookup, checked in this order:
//! 1. Exact (namespace, action) entry
//! 2. (`*`, action) entry
//! 3. (namespace, `*`) entry
//!
//! The first tier with an entry decides, even when that entry is an empty
//! list. No entry at any tier means unrestricted. Special pages and
//! dispatched actions have their own single-tier tables.

use crate::access_control::patterns::ReadWhitelist;
use crate::access_control::special::SpecialPageRules;
use crate::access_control::types::{Decision, GroupRule, GroupSet, READ_ACTION, WILDCARD};
use crate::config::LockdownConfig;
use crate::config::loader::{check_namespace_keys, namespace_names};
use crate::error::{ConfigError, PermissionError};
use crate::page::{Namespace, NamespaceNames, Title};
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// Namespace key in the namespace table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum NamespaceKey {
    Any,
    Id(Namespace),
}

/// Access decision evaluator
///
/// Built once from [`LockdownConfig`] and read-only afterwards. Every check
/// is a pure function of the tables and the caller's inputs.
#[derive(Debug)]
pub struct LockdownEvaluator {
    /// Namespace -> action -> rule
    namespaces: HashMap<NamespaceKey, HashMap<String, GroupRule>>,
    /// Special page rules in declaration order
    special_pages: SpecialPageRules,
    /// Dispatched action rules
    actions: HashMap<String, GroupRule>,
    /// Pages always readable
    whitelist: ReadWhitelist,
    /// Namespace names for prefixed page names
    names: NamespaceNames,
}

impl LockdownEvaluator {
    /// Create a new evaluator from configuration
    pub fn new(config: &LockdownConfig) -> Result<Self, ConfigError> {
        let names = namespace_names(config)?;
        check_namespace_keys(config, &names)?;

        let mut namespaces: HashMap<NamespaceKey, HashMap<String, GroupRule>> = HashMap::new();
        for (key, actions) in &config.namespaces {
            let ns_key = if key == WILDCARD {
                NamespaceKey::Any
            } else {
                let ns = names
                    .parse(key)
                    .ok_or_else(|| ConfigError::UnknownNamespace {
                        name: key.clone(),
                        field: "lockdown.namespaces".to_string(),
                    })?;
                NamespaceKey::Id(ns)
            };
            // "project" and "4" may both appear; their action sets are disjoint
            namespaces
                .entry(ns_key)
                .or_default()
                .extend(actions.iter().map(|(a, r)| (a.clone(), r.clone())));
        }

        if namespaces
            .get(&NamespaceKey::Any)
            .is_some_and(|actions| actions.contains_key(WILDCARD))
        {
            warn!("lockdown.namespaces.\"*\".\"*\" is never consulted; list namespaces explicitly");
        }

        let aliases = config
            .special_page_aliases
            .iter()
            .map(|a| (a.alias.clone(), a.page.clone()))
            .collect();
        let special_pages = SpecialPageRules::new(
            config
                .special_pages
                .iter()
                .map(|entry| (entry.name.as_str(), &entry.groups)),
            &aliases,
        );

        let whitelist = ReadWhitelist::new(&config.read_whitelist, &config.read_whitelist_patterns)?;

        debug!(
            namespaces = namespaces.len(),
            special_pages = special_pages.len(),
            actions = config.actions.len(),
            whitelist = whitelist.len(),
            "Lockdown tables loaded"
        );

        Ok(Self {
            namespaces,
            special_pages,
            actions: config.actions.clone(),
            whitelist,
            names,
        })
    }

    /// Decide whether `groups` may perform `action` on `page`
    ///
    /// User configuration pages are always allowed, as are whitelisted pages
    /// for `read`. Special pages consult the special page table, everything
    /// else the namespace table.
    pub fn resolve(&self, page: &Title, action: &str, groups: &GroupSet) -> Decision {
        debug!(
            page = %page.prefixed_text(&self.names),
            namespace = %page.namespace(),
            action,
            groups = %groups,
            "Checking access"
        );

        if page.is_user_config_page() {
            trace!("User configuration page is exempt");
            return Decision::Allow;
        }

        if action == READ_ACTION {
            let prefixed = page.prefixed_text(&self.names);
            if let Some(entry) = self.whitelist.find_match(&prefixed) {
                trace!(entry, "Matched read whitelist");
                return Decision::Allow;
            }
        }

        match page.special_page_key() {
            Some(key) => self.resolve_special_page(key, groups),
            None => self.resolve_namespace(page.namespace(), action, groups),
        }
    }

    /// Namespace tiers only
    pub fn resolve_namespace(&self, ns: Namespace, action: &str, groups: &GroupSet) -> Decision {
        match self.namespace_rule(ns, action) {
            Some(rule) => rule.evaluate(groups),
            None => Decision::Allow,
        }
    }

    /// Special page table only
    pub fn resolve_special_page(&self, key: &str, groups: &GroupSet) -> Decision {
        match self.special_pages.lookup(key) {
            Some(rule) => rule.evaluate(groups),
            None => {
                trace!(special_page = key, "No special page entry");
                Decision::Allow
            }
        }
    }

    /// Action table only, no wildcard fallback
    pub fn resolve_action(&self, action: &str, groups: &GroupSet) -> Decision {
        match self.actions.get(action) {
            Some(rule) => {
                trace!(action, "Matched action entry");
                rule.evaluate(groups)
            }
            None => Decision::Allow,
        }
    }

    /// The rule governing `action` in `ns`, if any tier has one
    pub fn namespace_rule(&self, ns: Namespace, action: &str) -> Option<&GroupRule> {
        let exact = self.namespaces.get(&NamespaceKey::Id(ns));

        if let Some(rule) = exact.and_then(|actions| actions.get(action)) {
            trace!(namespace = %ns, action, "Matched exact namespace entry");
            return Some(rule);
        }

        if let Some(rule) = self
            .namespaces
            .get(&NamespaceKey::Any)
            .and_then(|actions| actions.get(action))
        {
            trace!(namespace = %ns, action, "Matched any-namespace entry");
            return Some(rule);
        }

        if let Some(rule) = exact.and_then(|actions| actions.get(WILDCARD)) {
            trace!(namespace = %ns, action, "Matched any-action entry");
            return Some(rule);
        }

        None
    }

    /// Whether `groups` may read pages in `ns`
    pub fn is_namespace_readable(&self, ns: Namespace, groups: &GroupSet) -> bool {
        self.resolve_namespace(ns, READ_ACTION, groups).is_allowed()
    }

    /// Drop namespaces the requester cannot read
    pub fn filter_searchable_namespaces(&self, namespaces: &mut Vec<Namespace>, groups: &GroupSet) {
        namespaces.retain(|ns| {
            let readable = self.is_namespace_readable(*ns, groups);
            if !readable {
                trace!(namespace = %ns, "Removed from searchable namespaces");
            }
            readable
        });
    }

    /// Discard a near-match title in a namespace the requester cannot read
    ///
    /// Returns `true` when the title was discarded.
    pub fn suppress_near_match(&self, title: &mut Option<Title>, groups: &GroupSet) -> bool {
        let hidden = title
            .as_ref()
            .is_some_and(|t| !self.is_namespace_readable(t.namespace(), groups));
        if hidden {
            debug!("Suppressed near-match into unreadable namespace");
            *title = None;
        }
        hidden
    }

    /// Hard gate for a dispatched action
    pub fn gate_action(&self, action: &str, groups: &GroupSet) -> Result<(), PermissionError> {
        match self.resolve_action(action, groups).into_denial() {
            None => Ok(()),
            Some(message) => {
                debug!(action, %message, "Dispatched action denied");
                Err(PermissionError::new(action, message))
            }
        }
    }

    /// Namespace names used for prefixed page names
    pub fn names(&self) -> &NamespaceNames {
        &self.names
    }

    /// Create an evaluator with no restrictions
    pub fn allow_all() -> Self {
        Self {
            namespaces: HashMap::new(),
            special_pages: SpecialPageRules::default(),
            actions: HashMap::new(),
            whitelist: ReadWhitelist::empty(),
            names: NamespaceNames::new(),
        }
    }
}
