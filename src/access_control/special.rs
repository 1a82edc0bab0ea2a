//! Special page restrictions
//!
//! Entries are scanned in declaration order and the first entry naming the
//! requested special page wins. A request such as `Export/Main Page` names
//! the `Export` page; aliases map localized or legacy names onto the
//! canonical one. Names compare case-insensitively, so `EXPORT` is `Export`.

use crate::access_control::types::GroupRule;
use std::collections::HashMap;
use tracing::trace;

/// Ordered special page table
#[derive(Debug, Default)]
pub struct SpecialPageRules {
    entries: Vec<(String, GroupRule)>,
    aliases: HashMap<String, String>,
}

impl SpecialPageRules {
    /// Build from declared `(name, rule)` pairs and an alias table
    pub fn new<'a, I>(entries: I, aliases: &HashMap<String, String>) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a GroupRule)>,
    {
        let aliases = aliases
            .iter()
            .map(|(alias, canonical)| (base_name(alias), base_name(canonical)))
            .collect::<HashMap<_, _>>();

        let mut rules = Self {
            entries: Vec::new(),
            aliases,
        };
        let entries = entries
            .into_iter()
            .map(|(name, rule)| (rules.canonical(name), rule.clone()))
            .collect();
        rules.entries = entries;
        rules
    }

    /// Case-folded page name for a key, with parameter stripped and alias resolved
    pub fn canonical(&self, key: &str) -> String {
        let base = base_name(key);
        match self.aliases.get(&base) {
            Some(canonical) => canonical.clone(),
            None => base,
        }
    }

    /// First configured rule naming the requested page
    pub fn lookup(&self, key: &str) -> Option<&GroupRule> {
        let wanted = self.canonical(key);
        self.entries
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|(name, rule)| {
                trace!(special_page = %name, "Matched special page entry");
                rule
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `Special:EXPORT/Main_Page` -> `export`
fn base_name(key: &str) -> String {
    let key = key.trim();
    let key = match key.split_once(':') {
        Some((prefix, rest)) if prefix.trim().eq_ignore_ascii_case("special") => rest,
        _ => key,
    };
    let base = key.split('/').next().unwrap_or_default();
    base.trim().replace(' ', "_").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(entries: &[(&str, GroupRule)], aliases: &[(&str, &str)]) -> SpecialPageRules {
        let aliases = aliases
            .iter()
            .map(|(a, c)| (a.to_string(), c.to_string()))
            .collect();
        SpecialPageRules::new(entries.iter().map(|(n, r)| (*n, r)), &aliases)
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("Export"), "export");
        assert_eq!(base_name("export/Main Page"), "export");
        assert_eq!(base_name("Special:Recent changes"), "recent_changes");
        assert_eq!(base_name("special:Export"), "export");
        assert_eq!(base_name(" UserLogin "), "userlogin");
    }

    #[test]
    fn test_exact_and_parameterized() {
        let table = rules(&[("Export", GroupRule::groups(["sysop"]))], &[]);
        assert!(table.lookup("Export").is_some());
        assert!(table.lookup("Export/Main Page").is_some());
        assert!(table.lookup("Exporter").is_none());
        assert!(table.lookup("Import").is_none());
    }

    #[test]
    fn test_first_declared_wins() {
        let table = rules(
            &[
                ("Export/Foo", GroupRule::groups(["sysop"])),
                ("Export", GroupRule::nobody()),
            ],
            &[],
        );
        assert_eq!(table.lookup("Export"), Some(&GroupRule::groups(["sysop"])));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_alias() {
        let table = rules(
            &[("Recentchanges", GroupRule::groups(["user"]))],
            &[("Recent changes", "Recentchanges")],
        );
        assert!(table.lookup("Recent_changes").is_some());
        assert!(table.lookup("Recentchanges/50").is_some());
    }

    #[test]
    fn test_comparison_ignores_case() {
        let table = rules(&[("Export", GroupRule::nobody())], &[]);
        assert_eq!(table.lookup("EXPORT"), Some(&GroupRule::nobody()));
        assert_eq!(table.lookup("ExPort/Main_Page"), Some(&GroupRule::nobody()));
        assert_eq!(table.lookup("export"), Some(&GroupRule::nobody()));
    }

    #[test]
    fn test_alias_ignores_case() {
        let table = rules(
            &[("recentchanges", GroupRule::groups(["user"]))],
            &[("Recent Changes", "RecentChanges")],
        );
        assert!(table.lookup("RECENT_CHANGES").is_some());
        assert!(table.lookup("RecentChanges").is_some());
    }
}
