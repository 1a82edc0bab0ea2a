//! Wiki Lockdown
//!
//! Group-based access restrictions for wiki namespaces, special pages and
//! actions, plus the search filters that keep restricted pages hidden.
//!
//! ## Features
//!
//! - **Namespace lockdown** with exact, any-namespace and any-action tiers
//! - **Special page lockdown** with parameter and alias matching
//! - **Action lockdown** enforced as a hard gate after dispatch
//! - **Search filtering** of searchable namespaces and near-match redirects
//! - **Flexible configuration** via TOML files and environment variables
//!
//! ## Access Control Model
//!
//! ```text
//! user config page → read whitelist → special page | namespace tiers
//! ```
//!
//! Each entry is tri-state:
//! - absent or `"*"`: unrestricted
//! - `[]`: nobody
//! - `["sysop"]`: members of the listed groups
//!
//! ## Example Configuration
//!
//! ```toml
//! [lockdown]
//! read_whitelist = ["Main Page"]
//!
//! [lockdown.namespaces.0]
//! read = ["user"]                 # Content needs a login
//!
//! [lockdown.namespaces.project]
//! "*" = ["sysop"]                 # Project pages are admin-only
//!
//! [[lockdown.special_pages]]
//! name = "Export"
//! groups = ["sysop", "bureaucrat"]
//!
//! [lockdown.actions]
//! history = ["user"]
//! ```

pub mod access_control;
pub mod config;
pub mod error;
pub mod hooks;
pub mod message;
pub mod page;

// Re-export main types
pub use access_control::{Decision, GroupRule, GroupSet, LockdownEvaluator};
pub use config::{AppConfig, LockdownConfig, load_config};
pub use error::{AppError, ConfigError, PermissionError, Result};
pub use hooks::LockdownHooks;
pub use message::DenialMessage;
pub use page::{Namespace, Title};
