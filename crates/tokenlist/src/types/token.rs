use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::Rejection;

/// The all-zero address, treated the same as an omitted address.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// A validated, normalized token record.
///
/// The record is kept as its original JSON object with `name` and `ticker`
/// trimmed in place, so it serializes back with the input key order and any
/// extra keys untouched. The schema fields are also held typed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct Token {
    address: Option<String>,
    ticker: String,
    name: String,
    decimals: u8,
    chain_id: u64,
    logo_uri: Option<String>,
    record: Map<String, Value>,
}

impl Token {
    /// Built by the validator once every rule has passed.
    pub(crate) fn from_parts(
        address: Option<String>,
        ticker: String,
        name: String,
        decimals: u8,
        chain_id: u64,
        mut record: Map<String, Value>,
    ) -> Self {
        record.insert("ticker".to_string(), Value::String(ticker.clone()));
        record.insert("name".to_string(), Value::String(name.clone()));
        let logo_uri = record
            .get("logoURI")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self {
            address,
            ticker,
            name,
            decimals,
            chain_id,
            logo_uri,
            record,
        }
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// `logoURI` when it is a string.
    pub fn logo_uri(&self) -> Option<&str> {
        self.logo_uri.as_deref()
    }

    /// Any field of the record, including ones outside the schema.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.record.get(key)
    }

    /// True when the token stands for the chain's native currency.
    pub fn is_native(&self) -> bool {
        is_native_address(self.address())
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.record.serialize(serializer)
    }
}

impl TryFrom<Value> for Token {
    type Error = Rejection;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        crate::validate::validate(&value)
    }
}

/// Omitted, empty and zero addresses all denote the native asset.
pub fn is_native_address(address: Option<&str>) -> bool {
    match address {
        None => true,
        Some(a) => a.is_empty() || a.eq_ignore_ascii_case(ZERO_ADDRESS),
    }
}
