//! Error types for configuration loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid bind address '{addr}' for {section}")]
    InvalidBind { section: &'static str, addr: String },

    #[error("database path could not be expanded: {message}")]
    DatabasePath { message: String },
}
