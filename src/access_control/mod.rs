//! Access control module
//!
//! Decides whether a requester's groups permit an action on a page.
//!
//! ## Lookup Model
//!
//! Namespace pages use a three-tier lookup, first entry found wins:
//!
//! 1. **Exact** - `namespaces.<ns>.<action>`
//! 2. **Any namespace** - `namespaces."*".<action>`
//! 3. **Any action** - `namespaces.<ns>."*"`
//!
//! Special pages are matched against an ordered table (first declared match
//! wins) and dispatched actions against a flat action table.
//!
//! Each entry is tri-state:
//! - no entry or `"*"`: unrestricted
//! - `[]`: nobody
//! - `["a", "b"]`: members of `a` or `b`
//!
//! User configuration subpages are always allowed, and whitelisted pages are
//! always readable.
//!
//! ## Example Configuration
//!
//! ```toml
//! [lockdown]
//! read_whitelist = ["Main Page", "Special:UserLogin"]
//!
//! [lockdown.namespaces.0]
//! read = ["user"]
//!
//! [lockdown.namespaces.project]
//! "*" = ["sysop"]
//!
//! [[lockdown.special_pages]]
//! name = "Export"
//! groups = ["sysop", "bureaucrat"]
//! ```

pub mod patterns;
pub mod resolver;
pub mod special;
pub mod types;

pub use patterns::ReadWhitelist;
pub use resolver::LockdownEvaluator;
pub use special::SpecialPageRules;
pub use types::{Decision, GroupRule, GroupSet, READ_ACTION, WILDCARD};
