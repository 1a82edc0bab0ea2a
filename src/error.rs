//! Error types for wiki-lockdown
//!
//! This module defines the error hierarchy used throughout the crate.
//! Soft denials are data ([`crate::access_control::Decision`]); the only
//! abortive signal is [`PermissionError`], raised by the action dispatch gate.

use crate::message::DenialMessage;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Permission error: {0}")]
    Permission(#[from] PermissionError),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {field}")]
    Missing { field: String },

    #[error("Unknown namespace '{name}' in {field}")]
    UnknownNamespace { name: String, field: String },

    #[error("Invalid regex pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Hard denial raised when a dispatched action is not permitted.
///
/// Carries the same structured payload as a soft denial so the host can
/// render the usual "you must belong to one of" page before aborting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Permission denied for action '{action}': {message}")]
pub struct PermissionError {
    pub action: String,
    pub message: DenialMessage,
}

impl PermissionError {
    pub fn new(action: impl Into<String>, message: DenialMessage) -> Self {
        Self {
            action: action.into(),
            message,
        }
    }

    /// Groups that would have been permitted, empty for a deny-all entry
    pub fn required_groups(&self) -> &[String] {
        self.message.groups()
    }
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;
