// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Arbitrary-precision numeric normalization.
//!
//! Proving backends emit field elements and curve coordinates as JSON
//! strings (decimal, sometimes `0x` hex). [`normalize_numeric_encoding`]
//! rewrites every such string into a [`BigUint`] so nothing downstream ever
//! passes a 254/381-bit value through `f64` or `u64`.
//!
//! ```rust
//! use zkcall_sdk::numeric::{normalize_numeric_encoding, Numeric};
//!
//! let raw = Numeric::from(serde_json::json!(["0x10", "16", "groth16"]));
//! let n = normalize_numeric_encoding(raw);
//! let items = n.as_list().unwrap();
//! assert_eq!(items[0], items[1]);
//! assert_eq!(items[2].as_text(), Some("groth16"));
//! ```

use std::collections::BTreeMap;

use num_bigint::BigUint;
use serde_json::Value;

/// A JSON-shaped tree whose numeric strings may have been lifted to integers.
///
/// The tree owns its children, so it cannot contain cycles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Numeric {
    Null,
    Bool(bool),
    /// JSON number literal, passed through untouched
    Number(serde_json::Number),
    Integer(BigUint),
    Text(String),
    List(Vec<Numeric>),
    Map(BTreeMap<String, Numeric>),
}

impl Numeric {
    pub fn as_integer(&self) -> Option<&BigUint> {
        match self {
            Numeric::Integer(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Numeric]> {
        match self {
            Numeric::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Numeric::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Numeric> {
        match self {
            Numeric::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// Back to JSON; integers render as decimal strings (snarkjs convention).
    pub fn to_json(&self) -> Value {
        match self {
            Numeric::Null => Value::Null,
            Numeric::Bool(b) => Value::Bool(*b),
            Numeric::Number(n) => Value::Number(n.clone()),
            Numeric::Integer(n) => Value::String(n.to_str_radix(10)),
            Numeric::Text(s) => Value::String(s.clone()),
            Numeric::List(items) => Value::Array(items.iter().map(Numeric::to_json).collect()),
            Numeric::Map(map) => Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

impl From<Value> for Numeric {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Numeric::Null,
            Value::Bool(b) => Numeric::Bool(b),
            Value::Number(n) => Numeric::Number(n),
            Value::String(s) => Numeric::Text(s),
            Value::Array(items) => Numeric::List(items.into_iter().map(Numeric::from).collect()),
            Value::Object(map) => {
                Numeric::Map(map.into_iter().map(|(k, v)| (k, Numeric::from(v))).collect())
            }
        }
    }
}

impl From<BigUint> for Numeric {
    fn from(n: BigUint) -> Self {
        Numeric::Integer(n)
    }
}

/// Parse `^[0-9]+$` or `^0x[0-9a-fA-F]+$`; anything else is `None`.
pub fn parse_integer(s: &str) -> Option<BigUint> {
    if let Some(hex) = s.strip_prefix("0x") {
        if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return BigUint::parse_bytes(hex.as_bytes(), 16);
        }
        return None;
    }
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        return BigUint::parse_bytes(s.as_bytes(), 10);
    }
    None
}

/// Lift every decimal / `0x`-hex string leaf to [`Numeric::Integer`].
///
/// Idempotent: integers stay integers and the remaining text leaves are
/// exactly the ones that did not match on the first pass.
pub fn normalize_numeric_encoding(value: Numeric) -> Numeric {
    match value {
        Numeric::Text(s) => match parse_integer(&s) {
            Some(n) => Numeric::Integer(n),
            None => Numeric::Text(s),
        },
        Numeric::List(items) => {
            Numeric::List(items.into_iter().map(normalize_numeric_encoding).collect())
        }
        Numeric::Map(map) => Numeric::Map(
            map.into_iter()
                .map(|(k, v)| (k, normalize_numeric_encoding(v)))
                .collect(),
        ),
        other => other,
    }
}
