use std::collections::HashSet;
use std::fmt;

use crate::types::token::Token;

/// Uniqueness key for a token: `{chain_id}:native` or `{chain_id}:{address}`
/// with the address lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey(String);

impl DedupKey {
    pub fn new(chain_id: u64, address: Option<&str>) -> Self {
        if crate::types::token::is_native_address(address) {
            return Self(format!("{chain_id}:native"));
        }
        let addr = address.unwrap_or_default().to_lowercase();
        Self(format!("{chain_id}:{addr}"))
    }

    pub fn for_token(token: &Token) -> Self {
        Self::new(token.chain_id(), token.address())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DedupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keys seen so far in one build. Spans every input file.
#[derive(Debug, Default)]
pub struct SeenKeys {
    keys: HashSet<DedupKey>,
}

impl SeenKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key. Returns `false` if it was already present.
    pub fn insert(&mut self, key: DedupKey) -> bool {
        self.keys.insert(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::token::ZERO_ADDRESS;

    #[test]
    fn test_key_lowercases_address() {
        let a = DedupKey::new(1, Some("0xDAC17F958D2ee523a2206206994597C13D831ec7"));
        let b = DedupKey::new(1, Some("0xdac17f958d2ee523a2206206994597c13d831ec7"));
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "1:0xdac17f958d2ee523a2206206994597c13d831ec7");
    }

    #[test]
    fn test_native_forms_share_key() {
        let omitted = DedupKey::new(137, None);
        let zero = DedupKey::new(137, Some(ZERO_ADDRESS));
        assert_eq!(omitted, zero);
        assert_eq!(omitted.to_string(), "137:native");
    }

    #[test]
    fn test_key_is_per_chain() {
        assert_ne!(DedupKey::new(1, Some("0xabc")), DedupKey::new(10, Some("0xabc")));
    }

    #[test]
    fn test_seen_keys_first_insert_wins() {
        let mut seen = SeenKeys::new();
        assert!(seen.insert(DedupKey::new(1, Some("0xabc"))));
        assert!(!seen.insert(DedupKey::new(1, Some("0xABC"))));
        assert!(!seen.insert(DedupKey::new(1, Some("0xAbC"))));
        assert!(seen.insert(DedupKey::new(1, None)));
    }
}
