//! # Error Types Module
//!
//! Typed errors for the places where callers branch on the failure kind.
//! Everything else propagates as `anyhow::Error` with context attached.

use thiserror::Error;

/// Errors raised while reading configuration at startup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required key is absent or empty
    #[error("missing required configuration key {0}")]
    Missing(&'static str),
    /// A key is present but its value cannot be used
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Errors raised while decoding inline button callback data
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuTagError {
    /// The tag does not belong to any known menu action
    #[error("unknown menu tag: {0}")]
    Unknown(String),
    /// The tag prefix is known but the identifier part is not a number
    #[error("malformed identifier in menu tag: {0}")]
    MalformedId(String),
}
