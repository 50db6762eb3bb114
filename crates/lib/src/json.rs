//! Bridge between configuration values and `serde_json`.
//!
//! Configuration formats that go through serde hand over `serde_json::Value`
//! trees. These conversions move such trees in and out of [`Value`], and the
//! [`to_fields`] / [`from_fields`] helpers let any serde type act as a
//! polymorphic object without writing field mappings by hand:
//!
//! ```
//! use polyconf::{ConfigDeserializable, ConfigSerializable, Mapping, Result, json};
//!
//! #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
//! struct Spawn {
//!     world: String,
//!     radius: u32,
//! }
//!
//! impl ConfigSerializable for Spawn {
//!     fn serialize(&self) -> Mapping {
//!         json::to_fields(self).unwrap_or_default()
//!     }
//! }
//!
//! impl ConfigDeserializable for Spawn {
//!     fn deserialize(fields: &Mapping) -> Result<Self> {
//!         json::from_fields(fields)
//!     }
//! }
//! ```

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map as JsonMap, Number};

use crate::{Mapping, Result, Value, constants::DISCRIMINATOR_KEY, converter::ConvertError};

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => number_to_value(&n),
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(map.into_iter().collect()),
        }
    }
}

fn number_to_value(number: &Number) -> Value {
    if let Some(n) = number.as_i64() {
        i32::try_from(n).map_or(Value::Long(n), Value::Int)
    } else {
        // u64 beyond i64::MAX and every non-integer
        number.as_f64().map_or(Value::Null, Value::Float)
    }
}

impl TryFrom<Value> for serde_json::Value {
    type Error = crate::Error;

    /// Fails on unexpanded objects; serialize them with a
    /// [`TreeConverter`](crate::TreeConverter) first. Non-finite floats become
    /// `null`, as JSON has no representation for them.
    fn try_from(value: Value) -> Result<Self> {
        Ok(match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(n) => serde_json::Value::from(n),
            Value::Long(n) => serde_json::Value::from(n),
            Value::Float(n) => {
                Number::from_f64(n).map_or(serde_json::Value::Null, serde_json::Value::Number)
            }
            Value::Text(s) => serde_json::Value::String(s),
            Value::Map(mapping) => serde_json::Value::Object(
                mapping
                    .into_iter()
                    .map(|(k, v)| Ok((k, serde_json::Value::try_from(v)?)))
                    .collect::<Result<JsonMap<_, _>>>()?,
            ),
            Value::List(items) => serde_json::Value::Array(
                items
                    .into_iter()
                    .map(serde_json::Value::try_from)
                    .collect::<Result<_>>()?,
            ),
            Value::Object(object) => {
                return Err(ConvertError::TypeMismatch {
                    expected: "expanded mapping".to_string(),
                    actual: format!("object {}", object.type_name()),
                }
                .into());
            }
        })
    }
}

/// Describes a serde type as a field mapping.
///
/// Fails if `T` does not serialize to a JSON object.
pub fn to_fields<T: Serialize>(value: &T) -> Result<Mapping> {
    match Value::from(serde_json::to_value(value)?) {
        Value::Map(mapping) => Ok(mapping),
        other => Err(ConvertError::TypeMismatch {
            expected: "map".to_string(),
            actual: other.type_name().to_string(),
        }
        .into()),
    }
}

/// Builds a serde type from a field mapping, ignoring the discriminator key.
///
/// Nested values must already be plain data; an unexpanded object in the
/// mapping is an error.
pub fn from_fields<T: DeserializeOwned>(fields: &Mapping) -> Result<T> {
    let plain: Mapping = fields
        .iter()
        .filter(|(key, _)| *key != DISCRIMINATOR_KEY)
        .map(|(key, value)| (key, value.clone()))
        .collect();
    let json = serde_json::Value::try_from(Value::Map(plain))?;
    Ok(serde_json::from_value(json)?)
}
