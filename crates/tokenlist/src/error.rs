use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the token list build. Every variant is fatal.
#[derive(Debug, Error)]
pub enum Error {
    #[error("tokens directory {} is missing or not a directory", .0.display())]
    TokensDirMissing(PathBuf),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is malformed: {reason}", .path.display())]
    MalformedFile { path: PathBuf, reason: String },

    #[error("{} token file(s) are malformed: {}", .0.len(), join_paths(.0))]
    MalformedFiles(Vec<PathBuf>),

    #[error("no valid tokens found")]
    NoTokens,

    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("timestamp error: {0}")]
    Timestamp(#[from] time::error::Format),

    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors while loading the build configuration (package metadata).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown strictness mode: {0}")]
    UnknownStrictness(String),
}

/// The validator rule a token record failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("record is not an object")]
    NotAnObject,

    #[error("address must be omitted, null or a non-empty string")]
    InvalidAddress,

    #[error("ticker must be a non-empty string")]
    InvalidTicker,

    #[error("name must be a non-empty string")]
    InvalidName,

    #[error("decimals must be an integer in [0, 255]")]
    InvalidDecimals,

    #[error("chainId must be a positive integer")]
    InvalidChainId,
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
