use serde::{Deserialize, Serialize};

use super::chain::ChainGroup;

/// Semantic version triple of the artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Parse a `major.minor.patch`-like string. Missing or non-numeric
    /// components become 0; anything past the third is ignored.
    pub fn parse(s: &str) -> Self {
        let mut parts = s.trim().split('.').map(|p| p.trim().parse::<u64>().unwrap_or(0));
        Self {
            major: parts.next().unwrap_or(0),
            minor: parts.next().unwrap_or(0),
            patch: parts.next().unwrap_or(0),
        }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// The emitted token list artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenList {
    pub name: String,
    pub version: Version,
    pub timestamp: String,
    pub chains: Vec<ChainGroup>,
}

impl TokenList {
    /// Parse a token list from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the token list to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Total number of tokens across all chains.
    pub fn token_count(&self) -> usize {
        self.chains.iter().map(|c| c.tokens.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        assert_eq!(
            Version::parse("2.3.0"),
            Version { major: 2, minor: 3, patch: 0 }
        );
        assert_eq!(
            Version::parse("4"),
            Version { major: 4, minor: 0, patch: 0 }
        );
        assert_eq!(
            Version::parse("1.x.7"),
            Version { major: 1, minor: 0, patch: 7 }
        );
        assert_eq!(Version::parse(""), Version::default());
    }

    #[test]
    fn test_version_display() {
        assert_eq!(Version::parse("1.2.3").to_string(), "1.2.3");
    }
}
