use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::scanner::Strictness;

/// Name used when neither the package nor the caller provides one.
pub const DEFAULT_LIST_NAME: &str = "Coinvoyage Token List";

/// Version used when the package does not declare one.
pub const DEFAULT_VERSION: &str = "0.0.0";

/// Paths and policy for one build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory of per-chain token files.
    pub tokens_dir: PathBuf,
    /// Chain registry; optional on disk.
    pub chains_path: PathBuf,
    /// Package metadata supplying the version and list name.
    pub package_path: PathBuf,
    /// Where the artifact is written.
    pub output_path: PathBuf,
    pub strictness: Strictness,
    /// Overrides the package's `tokenListName`.
    pub name_override: Option<String>,
}

impl BuildConfig {
    /// Default layout under a project root.
    pub fn from_root(root: &Path) -> Self {
        Self {
            tokens_dir: root.join("tokens"),
            chains_path: root.join("chains.json"),
            package_path: root.join("package.json"),
            output_path: root.join("tokenlist.json"),
            strictness: Strictness::default(),
            name_override: None,
        }
    }
}

/// The subset of `package.json` used by the build.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageMeta {
    #[serde(default)]
    pub version: Option<String>,

    #[serde(rename = "tokenListName")]
    #[serde(default)]
    pub token_list_name: Option<String>,
}

impl PackageMeta {
    /// Read package metadata. Unreadable or unparseable files are fatal.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Declared version, or `0.0.0`.
    pub fn version(&self) -> &str {
        self.version
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_VERSION)
    }

    /// Declared list name, or the default.
    pub fn list_name(&self) -> &str {
        self.token_list_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_LIST_NAME)
    }
}
