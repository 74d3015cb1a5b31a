//! Error types for tabid

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TabidError>;

/// Main error type for tabid
#[derive(Debug, Error)]
pub enum TabidError {
    #[error("input not found: {}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input is not UTF-8 text: {}: {source}", path.display())]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TabidError {
    /// Short machine-friendly name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            TabidError::NotFound { .. } => "not-found",
            TabidError::Encoding { .. } => "encoding",
            TabidError::Parse { .. } => "parse",
            TabidError::Write { .. } => "write",
            TabidError::Config(_) => "config",
        }
    }
}
