//! Error types for tileworld_core.
//!
//! Simulation operations never fail: out-of-bounds queries, exhausted spawn
//! attempts and dangling agent references all degrade to "no effect". The
//! only fallible surface is configuration.

use thiserror::Error;

/// Errors raised at the configuration boundary.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A setting is outside its accepted range.
    #[error("Invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    /// Config file could not be read or written.
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

impl ConfigError {
    #[must_use]
    pub fn invalid<S: Into<String>>(field: &'static str, reason: S) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
