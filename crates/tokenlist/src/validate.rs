use serde_json::{Map, Value};

use crate::error::Rejection;
use crate::types::token::Token;

/// Upper bound for `decimals`.
pub const MAX_DECIMALS: u64 = 255;

/// Check a raw record against the token schema.
pub fn is_valid(record: &Value) -> bool {
    validate(record).is_ok()
}

/// Validate a raw record and return its normalized form.
///
/// Normalization trims `name` and `ticker`; every other field passes
/// through unchanged.
pub fn validate(record: &Value) -> Result<Token, Rejection> {
    let obj = record.as_object().ok_or(Rejection::NotAnObject)?;

    let address = match obj.get("address") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(_) => return Err(Rejection::InvalidAddress),
    };
    let ticker = trimmed_string(obj, "ticker").ok_or(Rejection::InvalidTicker)?;
    let name = trimmed_string(obj, "name").ok_or(Rejection::InvalidName)?;
    let decimals = obj
        .get("decimals")
        .and_then(as_integer)
        .filter(|d| *d <= MAX_DECIMALS)
        .and_then(|d| u8::try_from(d).ok())
        .ok_or(Rejection::InvalidDecimals)?;
    let chain_id = obj
        .get("chainId")
        .and_then(as_integer)
        .filter(|id| *id > 0)
        .ok_or(Rejection::InvalidChainId)?;

    Ok(Token::from_parts(
        address,
        ticker,
        name,
        decimals,
        chain_id,
        obj.clone(),
    ))
}

fn trimmed_string(obj: &Map<String, Value>, key: &str) -> Option<String> {
    let s = obj.get(key)?.as_str()?.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Non-negative integer value of a JSON number. Floats with no fractional
/// part (e.g. `18.0`) count as integers.
pub(crate) fn as_integer(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    (f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64).then_some(f as u64)
}
