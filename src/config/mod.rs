//! Configuration module
//!
//! Loads the lockdown tables once at startup from TOML and environment
//! variables. The result is read-only for the life of the process.

pub mod loader;
pub mod types;

pub use loader::{load_config, load_config_from_str};
pub use types::*;
