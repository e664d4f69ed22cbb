use std::path::PathBuf;
use thiserror::Error;

/// Failure to fetch or parse the word list. Terminal for the session.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read word list {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse word list: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A command or enum value the UI layer should never have produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unrecognized type filter '{0}' (expected all, noun, adj, verb or phrase)")]
    InvalidFilter(String),
    #[error("unrecognized gender mode '{0}' (expected both, m or f)")]
    InvalidGenderMode(String),
    #[error("unrecognized command '{0}'")]
    UnknownCommand(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
