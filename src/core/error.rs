//! Error types for netgrade
//!
//! This module defines the main error type used throughout the application,
//! along with the crate-wide `Result` alias.

use std::fmt;

/// Main error type for netgrade operations
#[derive(Debug)]
pub enum NetgradeError {
    /// Configuration file errors
    Config(String),

    /// TOML parsing errors
    TomlParsing(toml::de::Error),

    /// HTTP request errors from probes
    Http(reqwest::Error),

    /// A probe exceeded its time budget
    Timeout(String),

    /// Invalid run parameters
    InvalidArgument(String),

    /// The run was cancelled by the user
    Cancelled,
}

impl fmt::Display for NetgradeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetgradeError::Config(msg) => write!(f, "Configuration error: {msg}"),
            NetgradeError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            NetgradeError::Http(err) => write!(f, "HTTP error: {err}"),
            NetgradeError::Timeout(what) => write!(f, "Operation timed out: {what}"),
            NetgradeError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            NetgradeError::Cancelled => write!(f, "Run cancelled"),
        }
    }
}

impl std::error::Error for NetgradeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NetgradeError::TomlParsing(err) => Some(err),
            NetgradeError::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NetgradeError {
    fn from(err: reqwest::Error) -> Self {
        NetgradeError::Http(err)
    }
}

impl From<toml::de::Error> for NetgradeError {
    fn from(err: toml::de::Error) -> Self {
        NetgradeError::TomlParsing(err)
    }
}

impl NetgradeError {
    /// Whether this error is the distinguished cancellation signal.
    ///
    /// Probes surface cancellation through this variant so the runner can
    /// tell "stop the whole run" apart from a per-phase failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, NetgradeError::Cancelled)
    }

    /// Whether this error came from a per-probe time budget.
    pub fn is_timeout(&self) -> bool {
        matches!(self, NetgradeError::Timeout(_))
    }
}

/// Convenience result type for netgrade operations
pub type Result<T> = std::result::Result<T, NetgradeError>;
