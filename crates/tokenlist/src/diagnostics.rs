use std::fmt;
use std::path::PathBuf;

use serde_json::Value;

use crate::error::Rejection;

/// A recoverable problem found during a build. The offending input is
/// skipped and the build continues.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The chain registry could not be used; chain names fall back.
    RegistryUnavailable { path: PathBuf, reason: String },

    /// A token file was skipped (lenient mode only).
    MalformedFile { file: String, reason: String },

    /// A record failed validation.
    InvalidToken {
        file: String,
        record: Value,
        rejection: Rejection,
    },

    /// A record collided with an earlier one on its dedup key.
    DuplicateToken {
        file: String,
        chain_id: u64,
        address: Option<String>,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::RegistryUnavailable { path, reason } => write!(
                f,
                "{} missing or invalid, chain names and logos will fall back to native tokens: {reason}",
                path.display()
            ),
            Diagnostic::MalformedFile { file, reason } => {
                write!(f, "{file} is malformed, skipping: {reason}")
            }
            Diagnostic::InvalidToken {
                file,
                record,
                rejection,
            } => write!(f, "invalid token in {file} ({rejection}), skipping: {record}"),
            Diagnostic::DuplicateToken {
                file,
                chain_id,
                address,
            } => write!(
                f,
                "duplicate token in {file} (chainId={chain_id}, address={}), skipping",
                address.as_deref().unwrap_or("native")
            ),
        }
    }
}
