use std::collections::{BTreeMap, HashSet};

use log::warn;
use serde_json::Value;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::dedup::{DedupKey, SeenKeys};
use crate::diagnostics::Diagnostic;
use crate::error::Error;
use crate::registry::ChainRegistry;
use crate::resolver::ChainResolver;
use crate::scanner::TokenFile;
use crate::types::chain::{ChainGroup, NativeCurrency};
use crate::types::token::Token;
use crate::types::token_list::{TokenList, Version};
use crate::validate::validate;

/// Validates, deduplicates and groups token records by chain.
///
/// Records must be fed in scan order: the first record for a dedup key wins
/// and each chain keeps its tokens in the order they arrive.
#[derive(Debug, Default)]
pub struct Aggregator {
    seen: SeenKeys,
    groups: BTreeMap<u64, Vec<Token>>,
    diagnostics: Vec<Diagnostic>,
    token_count: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed every record of a scanned file.
    pub fn add_file(&mut self, file: &TokenFile) {
        for record in &file.records {
            self.add_record(&file.name, record);
        }
    }

    /// Feed one raw record. Returns `true` if it was kept.
    pub fn add_record(&mut self, file: &str, record: &Value) -> bool {
        let token = match validate(record) {
            Ok(token) => token,
            Err(rejection) => {
                self.report(Diagnostic::InvalidToken {
                    file: file.to_string(),
                    record: record.clone(),
                    rejection,
                });
                return false;
            }
        };

        if !self.seen.insert(DedupKey::for_token(&token)) {
            self.report(Diagnostic::DuplicateToken {
                file: file.to_string(),
                chain_id: token.chain_id(),
                address: token.address().map(str::to_string),
            });
            return false;
        }

        self.groups.entry(token.chain_id()).or_default().push(token);
        self.token_count += 1;
        true
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    /// Number of tokens kept so far.
    pub fn token_count(&self) -> usize {
        self.token_count
    }

    /// Build ordered chain groups with resolved display metadata.
    pub fn finish(self, registry: &ChainRegistry) -> Aggregation {
        let resolver = ChainResolver::standard(registry);
        let order = order_chain_ids(self.groups.keys().copied(), registry.order());

        let mut groups = self.groups;
        let chains = order
            .into_iter()
            .filter_map(|chain_id| {
                let tokens = groups.remove(&chain_id)?;
                Some(build_group(&resolver, chain_id, tokens))
            })
            .collect();

        Aggregation {
            chains,
            diagnostics: self.diagnostics,
            token_count: self.token_count,
        }
    }
}

/// Grouped output of an [`Aggregator`].
#[derive(Debug)]
pub struct Aggregation {
    pub chains: Vec<ChainGroup>,
    pub diagnostics: Vec<Diagnostic>,
    pub token_count: usize,
}

fn build_group(resolver: &ChainResolver<'_>, chain_id: u64, tokens: Vec<Token>) -> ChainGroup {
    let native = tokens.iter().find(|t| t.is_native());
    let (name, logo_uri) = resolver.resolve(chain_id, native);
    let native_currency = native.map(NativeCurrency::from_token);
    ChainGroup {
        chain_id,
        name,
        logo_uri,
        native_currency,
        tokens,
    }
}

/// Chains in registry order first (only those present), then the rest
/// ascending by id.
pub fn order_chain_ids(present: impl IntoIterator<Item = u64>, registry_order: &[u64]) -> Vec<u64> {
    let present: HashSet<u64> = present.into_iter().collect();

    let mut ordered = Vec::with_capacity(present.len());
    let mut placed = HashSet::new();
    for id in registry_order {
        if present.contains(id) && placed.insert(*id) {
            ordered.push(*id);
        }
    }

    let mut rest: Vec<u64> = present.difference(&placed).copied().collect();
    rest.sort_unstable();
    ordered.extend(rest);
    ordered
}

/// ISO-8601 UTC timestamp with millisecond precision.
pub fn format_timestamp(at: OffsetDateTime) -> Result<String, Error> {
    let format =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");
    Ok(at.to_offset(UtcOffset::UTC).format(&format)?)
}

/// Assemble the final artifact.
pub fn assemble(
    name: &str,
    version: Version,
    generated_at: OffsetDateTime,
    chains: Vec<ChainGroup>,
) -> Result<TokenList, Error> {
    Ok(TokenList {
        name: name.to_string(),
        version,
        timestamp: format_timestamp(generated_at)?,
        chains,
    })
}
