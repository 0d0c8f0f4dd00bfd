//! JSON codec for transactions as the REST and push APIs report them.
//!
//! The gateway encodes every 64-bit quantity as a `[lower, higher]` pair of
//! unsigned 32-bit numbers, keys and hashes as hex strings and addresses in
//! their encoded (hex) form. [`from_json`] turns such an object into a
//! [`Transaction`](crate::Transaction); [`to_json`] produces the same shape.

mod decode;
mod encode;

pub use decode::{from_json, from_json_str};
pub use encode::to_json;

use crate::{Transaction, TxError};
use serde_json::{json, Value};
use sirius_types::uint64;

impl Transaction {
    pub fn from_json(json: &Value) -> Result<Transaction, TxError> {
        from_json(json)
    }

    pub fn to_json(&self) -> Value {
        to_json(self)
    }
}

// ─── Field Access ───────────────────────────────────────────────────────────

pub(crate) fn field<'a>(v: &'a Value, key: &str) -> Result<&'a Value, TxError> {
    v.get(key).ok_or_else(|| TxError::Decode(format!("missing field: {key}")))
}

/// The first of `keys` present in `v`. Older gateways use different names
/// for a few fields.
pub(crate) fn first_field<'a>(v: &'a Value, keys: &[&str]) -> Result<&'a Value, TxError> {
    keys.iter()
        .find_map(|key| v.get(*key))
        .ok_or_else(|| TxError::Decode(format!("missing field: {}", keys.join(" or "))))
}

pub(crate) fn get_str<'a>(v: &'a Value, key: &str) -> Result<&'a str, TxError> {
    field(v, key)?
        .as_str()
        .ok_or_else(|| TxError::Decode(format!("{key}: expected a string")))
}

pub(crate) fn opt_str(v: &Value, key: &str) -> Option<String> {
    v.get(key).and_then(Value::as_str).map(str::to_string)
}

pub(crate) fn get_array<'a>(v: &'a Value, key: &str) -> Result<&'a [Value], TxError> {
    field(v, key)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| TxError::Decode(format!("{key}: expected an array")))
}

/// An optional array field; absent and `null` both read as empty.
pub(crate) fn opt_array<'a>(v: &'a Value, key: &str) -> Result<&'a [Value], TxError> {
    match v.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(_) => get_array(v, key),
    }
}

/// A 64-bit value given as a `[lower, higher]` pair, a plain number or a
/// decimal string.
pub(crate) fn as_u64(value: &Value, key: &str) -> Result<u64, TxError> {
    let bad = || TxError::Decode(format!("{key}: expected an unsigned 64-bit value"));
    match value {
        Value::Array(pair) => match pair.as_slice() {
            [lo, hi] => {
                let lo = lo.as_u64().and_then(|n| u32::try_from(n).ok()).ok_or_else(bad)?;
                let hi = hi.as_u64().and_then(|n| u32::try_from(n).ok()).ok_or_else(bad)?;
                Ok(uint64::from_pair([lo, hi]))
            }
            _ => Err(bad()),
        },
        Value::Number(n) => n.as_u64().ok_or_else(bad),
        Value::String(s) => s.parse().map_err(|_| bad()),
        _ => Err(bad()),
    }
}

pub(crate) fn get_u64(v: &Value, key: &str) -> Result<u64, TxError> {
    as_u64(field(v, key)?, key)
}

pub(crate) fn get_u32(v: &Value, key: &str) -> Result<u32, TxError> {
    let n = get_u64(v, key)?;
    u32::try_from(n).map_err(|_| TxError::Decode(format!("{key}: {n} out of range")))
}

pub(crate) fn get_u8(v: &Value, key: &str) -> Result<u8, TxError> {
    let n = get_u64(v, key)?;
    u8::try_from(n).map_err(|_| TxError::Decode(format!("{key}: {n} out of range")))
}

pub(crate) fn get_i8(v: &Value, key: &str) -> Result<i8, TxError> {
    let n = field(v, key)?
        .as_i64()
        .ok_or_else(|| TxError::Decode(format!("{key}: expected an integer")))?;
    i8::try_from(n).map_err(|_| TxError::Decode(format!("{key}: {n} out of range")))
}

/// A 64-bit value in the gateway's `[lower, higher]` form.
pub(crate) fn pair(value: u64) -> Value {
    json!(uint64::to_pair(value))
}
