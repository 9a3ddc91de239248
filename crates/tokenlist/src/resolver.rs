use crate::registry::ChainRegistry;
use crate::types::chain::fallback_chain_name;
use crate::types::token::Token;

/// Display name and logo for a chain, as far as one source knows them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainDisplay {
    pub name: Option<String>,
    pub logo_uri: Option<String>,
}

/// Trait for chain display sources (registry, native token, etc.).
pub trait ChainInfoSource {
    fn lookup(&self, chain_id: u64, native: Option<&Token>) -> ChainDisplay;
}

impl ChainInfoSource for ChainRegistry {
    fn lookup(&self, chain_id: u64, _native: Option<&Token>) -> ChainDisplay {
        self.get(chain_id)
            .map(|meta| ChainDisplay {
                name: Some(meta.name.clone()),
                logo_uri: meta.logo_uri.clone(),
            })
            .unwrap_or_default()
    }
}

/// Uses the chain's native token name and logo.
pub struct NativeTokenSource;

impl ChainInfoSource for NativeTokenSource {
    fn lookup(&self, _chain_id: u64, native: Option<&Token>) -> ChainDisplay {
        native
            .map(|t| ChainDisplay {
                name: Some(t.name().to_string()),
                logo_uri: t.logo_uri().map(str::to_string),
            })
            .unwrap_or_default()
    }
}

/// Ordered list of sources. Name and logo are resolved independently, each
/// taking the first source that has a value. A chain no source names gets
/// `Chain <id>`; one no source has a logo for gets none.
pub struct ChainResolver<'a> {
    sources: Vec<&'a dyn ChainInfoSource>,
}

impl<'a> ChainResolver<'a> {
    pub fn new(sources: Vec<&'a dyn ChainInfoSource>) -> Self {
        Self { sources }
    }

    /// Registry first, then native token.
    pub fn standard(registry: &'a ChainRegistry) -> Self {
        Self::new(vec![registry as &dyn ChainInfoSource, &NativeTokenSource])
    }

    /// Resolve the display name and logo for a chain.
    pub fn resolve(&self, chain_id: u64, native: Option<&Token>) -> (String, Option<String>) {
        let mut name = None;
        let mut logo_uri = None;
        for source in &self.sources {
            let found = source.lookup(chain_id, native);
            name = name.or(found.name);
            logo_uri = logo_uri.or(found.logo_uri);
            if name.is_some() && logo_uri.is_some() {
                break;
            }
        }
        (name.unwrap_or_else(|| fallback_chain_name(chain_id)), logo_uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::chain::ChainMeta;
    use crate::validate::validate;
    use serde_json::json;

    fn native(name: &str, logo: Option<&str>) -> Token {
        let mut record = json!({
            "ticker": "NAT",
            "name": name,
            "decimals": 18,
            "chainId": 1
        });
        if let Some(logo) = logo {
            record["logoURI"] = json!(logo);
        }
        validate(&record).unwrap()
    }

    #[test]
    fn test_registry_takes_priority() {
        let mut registry = ChainRegistry::empty();
        registry.insert(
            1,
            ChainMeta {
                name: "Ethereum".to_string(),
                logo_uri: Some("https://example.com/eth-chain.png".to_string()),
            },
        );
        let token = native("Ether", Some("https://example.com/eth.png"));
        let (name, logo) = ChainResolver::standard(&registry).resolve(1, Some(&token));
        assert_eq!(name, "Ethereum");
        assert_eq!(logo.as_deref(), Some("https://example.com/eth-chain.png"));
    }

    #[test]
    fn test_logo_falls_through_to_native_token() {
        let mut registry = ChainRegistry::empty();
        registry.insert(
            1,
            ChainMeta {
                name: "Ethereum".to_string(),
                logo_uri: None,
            },
        );
        let token = native("Ether", Some("https://example.com/eth.png"));
        let (name, logo) = ChainResolver::standard(&registry).resolve(1, Some(&token));
        assert_eq!(name, "Ethereum");
        assert_eq!(logo.as_deref(), Some("https://example.com/eth.png"));
    }

    #[test]
    fn test_registered_chain_without_name_keeps_chain_name() {
        let registry =
            ChainRegistry::from_json(r#"[{ "chainId": 1, "logoURI": "https://example.com/1.png" }]"#)
                .unwrap();
        let token = native("Ether", None);
        let (name, logo) = ChainResolver::standard(&registry).resolve(1, Some(&token));
        assert_eq!(name, "Chain 1");
        assert_eq!(logo.as_deref(), Some("https://example.com/1.png"));
    }

    #[test]
    fn test_native_token_then_fallback() {
        let registry = ChainRegistry::empty();
        let resolver = ChainResolver::standard(&registry);

        let token = native("Ether", None);
        assert_eq!(resolver.resolve(1, Some(&token)), ("Ether".to_string(), None));
        assert_eq!(resolver.resolve(42161, None), ("Chain 42161".to_string(), None));
    }

    #[test]
    fn test_no_sources_uses_fallback_name() {
        let resolver = ChainResolver::new(Vec::new());
        assert_eq!(resolver.resolve(10, None), ("Chain 10".to_string(), None));
    }
}
