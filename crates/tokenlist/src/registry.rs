use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde_json::Value;

use crate::diagnostics::Diagnostic;
use crate::types::chain::{fallback_chain_name, ChainMeta};
use crate::validate::as_integer;

/// Chain display metadata plus the preferred chain order, read from the
/// chain registry file (`chains.json`).
#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    entries: HashMap<u64, ChainMeta>,
    order: Vec<u64>,
}

impl ChainRegistry {
    /// Create an empty registry.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the registry from disk. A missing or malformed file is not an
    /// error: an empty registry is returned alongside a diagnostic.
    pub fn load(path: &Path) -> (Self, Option<Diagnostic>) {
        let parsed = fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|raw| Self::from_json(&raw));

        match parsed {
            Ok(registry) => {
                debug!(
                    "loaded {} chain(s) from {}",
                    registry.order.len(),
                    path.display()
                );
                (registry, None)
            }
            Err(reason) => {
                let diagnostic = Diagnostic::RegistryUnavailable {
                    path: path.to_path_buf(),
                    reason,
                };
                warn!("{diagnostic}");
                (Self::empty(), Some(diagnostic))
            }
        }
    }

    /// Parse registry JSON: an array of `{ chainId, name?, logoURI? }`.
    ///
    /// Entries without a positive integer `chainId` are skipped. A registered
    /// chain without a string `name` is named `Chain <id>`. Later entries
    /// for the same id replace earlier ones; the declared order keeps the
    /// first position.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let value: Value = serde_json::from_str(json).map_err(|e| e.to_string())?;
        let Value::Array(items) = value else {
            return Err("expected a top-level array".to_string());
        };

        let mut registry = Self::empty();
        for item in &items {
            let Some(chain_id) = item
                .get("chainId")
                .and_then(as_integer)
                .filter(|id| *id > 0)
            else {
                debug!("skipping registry entry without a valid chainId: {item}");
                continue;
            };
            let meta = ChainMeta {
                name: item
                    .get("name")
                    .and_then(Value::as_str)
                    .map_or_else(|| fallback_chain_name(chain_id), str::to_string),
                logo_uri: item
                    .get("logoURI")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            };
            registry.insert(chain_id, meta);
        }
        Ok(registry)
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, chain_id: u64, meta: ChainMeta) {
        if self.entries.insert(chain_id, meta).is_none() {
            self.order.push(chain_id);
        }
    }

    /// Look up metadata for a chain.
    pub fn get(&self, chain_id: u64) -> Option<&ChainMeta> {
        self.entries.get(&chain_id)
    }

    /// Chain ids in declared order, without duplicates.
    pub fn order(&self) -> &[u64] {
        &self.order
    }
}
