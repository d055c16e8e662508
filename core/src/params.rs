//! Parameter mappings and query-string encoding.
//!
//! A [`Params`] is a JSON object. Resource modules fill it through
//! [`ParamsBuilder`], which inserts optional fields only when they carry a
//! value; the dispatcher then either encodes it into query pairs or
//! serializes it as the JSON body.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ClozeError, Result};

/// Named request parameters, in insertion order.
pub type Params = Map<String, Value>;

pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| ClozeError::Encoding(e.to_string()))
}

/// Convert any serializable mapping into [`Params`]. Anything that does not
/// serialize to a JSON object is an encoding error.
pub fn to_params<T: Serialize + ?Sized>(value: &T) -> Result<Params> {
    match to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(ClozeError::Encoding(format!(
            "expected a JSON object, got {}",
            json_type(&other)
        ))),
    }
}

/// Encode a parameter mapping as ordered query pairs.
///
/// Nulls are dropped, arrays repeat the key once per element, and nested
/// objects are rejected.
pub fn encode_query(params: &Params) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = scalar_text(key, item)? {
                        pairs.push((key.clone(), text));
                    }
                }
            }
            other => {
                if let Some(text) = scalar_text(key, other)? {
                    pairs.push((key.clone(), text));
                }
            }
        }
    }
    Ok(pairs)
}

fn scalar_text(key: &str, value: &Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Array(_) | Value::Object(_) => Err(ClozeError::Encoding(format!(
            "query parameter '{key}' must be a scalar or a list of scalars, got nested {}",
            json_type(value)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Builds a [`Params`] mapping following the omission convention: required
/// fields are always inserted, optional ones only when present.
#[derive(Debug, Default)]
pub struct ParamsBuilder {
    params: Params,
}

impl ParamsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing mapping, e.g. caller-supplied extra params.
    pub fn from_params(params: Params) -> Self {
        Self { params }
    }

    pub fn required(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Insert when `Some`; `None` leaves the key absent.
    pub fn optional<V: Into<Value>>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.params.insert(key.to_string(), value.into());
        }
        self
    }

    /// Insert when `Some` and non-empty.
    pub fn optional_str(self, key: &str, value: Option<&str>) -> Self {
        self.optional(key, value.filter(|v| !v.is_empty()))
    }

    /// Merge every entry of `other`; colliding keys take `other`'s value.
    pub fn merge(mut self, other: Params) -> Self {
        self.params.extend(other);
        self
    }

    pub fn build(self) -> Params {
        self.params
    }
}
