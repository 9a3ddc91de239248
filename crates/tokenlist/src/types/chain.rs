use serde::{Deserialize, Serialize};

use super::token::Token;

/// Name for a chain nothing else names.
pub fn fallback_chain_name(chain_id: u64) -> String {
    format!("Chain {chain_id}")
}

/// Display metadata for one chain, as declared in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainMeta {
    pub name: String,
    pub logo_uri: Option<String>,
}

/// Native currency summary derived from a chain's native token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub symbol: String,
    pub decimals: u8,
}

impl NativeCurrency {
    pub fn from_token(token: &Token) -> Self {
        Self {
            symbol: token.ticker().to_string(),
            decimals: token.decimals(),
        }
    }
}

/// A chain with its display metadata and deduplicated tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainGroup {
    #[serde(rename = "chainId")]
    pub chain_id: u64,

    pub name: String,

    #[serde(rename = "logoURI")]
    pub logo_uri: Option<String>,

    #[serde(rename = "nativeCurrency")]
    pub native_currency: Option<NativeCurrency>,

    pub tokens: Vec<Token>,
}
