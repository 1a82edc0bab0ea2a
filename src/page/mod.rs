//! Page identity
//!
//! Namespaces and titles as seen by the lockdown evaluator. The host platform
//! owns the real page store; these types only carry what a decision needs.

pub mod namespace;
pub mod title;

pub use namespace::{Namespace, NamespaceNames};
pub use title::Title;
