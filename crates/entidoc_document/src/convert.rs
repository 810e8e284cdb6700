//! Conversion between Rust values and document values.
//!
//! Conversion of ordinary values is delegated to `serde`: anything that is
//! `Serialize` becomes a [`Value`], and a [`Value`] can be read back into any
//! `DeserializeOwned` type. Field order of structs and maps is preserved.

use crate::error::{DocumentError, DocumentResult};
use crate::value::Value;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Converts any serializable value into a document value.
///
/// # Errors
///
/// Returns an error if the value's `Serialize` implementation fails, if a map
/// key is not a string, or if an integer exceeds the i64 range.
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> DocumentResult<Value> {
    let json = serde_json::to_value(value)
        .map_err(|e| DocumentError::conversion_failed(e.to_string()))?;
    Value::try_from(json)
}

/// Converts a document value into any deserializable type.
///
/// Duplicate object keys resolve last-write-wins.
///
/// # Errors
///
/// Returns an error if the value does not have the shape `T` expects.
pub fn from_value<T: DeserializeOwned>(value: Value) -> DocumentResult<T> {
    serde_json::from_value(serde_json::Value::from(value))
        .map_err(|e| DocumentError::conversion_failed(e.to_string()))
}

impl TryFrom<serde_json::Value> for Value {
    type Error = DocumentError;

    fn try_from(json: serde_json::Value) -> DocumentResult<Self> {
        Ok(match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else if n.is_u64() {
                    return Err(DocumentError::IntegerOverflow {
                        value: n.to_string(),
                    });
                } else {
                    n.as_f64().map_or(Value::Null, Value::Float)
                }
            }
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<DocumentResult<_>>()?,
            ),
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| Ok((k, Value::try_from(v)?)))
                    .collect::<DocumentResult<_>>()?,
            ),
        })
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Integer(n) => serde_json::Value::from(n),
            Value::Float(n) => serde_json::Number::from_f64(n)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::Text(s) => serde_json::Value::String(s),
            Value::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Object(fields) => {
                let mut map = serde_json::Map::with_capacity(fields.len());
                for (key, value) in fields {
                    map.insert(key, value.into());
                }
                serde_json::Value::Object(map)
            }
        }
    }
}
