//! Typed field access for object constructors.

use crate::{
    ConfigSerializable, Mapping, Result, Value,
    constants::{DISCRIMINATOR_KEY, UNKNOWN_ALIAS},
    registry::RegistryError,
};

/// Reads fields out of a discriminated mapping with structured errors.
///
/// Errors name the alias found under the discriminator key so a failure deep
/// inside a configuration tree can be traced back to the object type.
///
/// # Examples
///
/// ```
/// use polyconf::{Mapping, registry::FieldReader};
///
/// let mut fields = Mapping::new();
/// fields.insert("==", "point");
/// fields.insert("x", 3);
///
/// let reader = FieldReader::new(&fields);
/// assert_eq!(reader.int("x").unwrap(), 3);
/// assert!(reader.int("y").is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FieldReader<'a> {
    fields: &'a Mapping,
}

impl<'a> FieldReader<'a> {
    pub fn new(fields: &'a Mapping) -> Self {
        Self { fields }
    }

    /// Alias under the discriminator key, or a placeholder
    pub fn alias(&self) -> &'a str {
        self.fields
            .get(DISCRIMINATOR_KEY)
            .and_then(Value::as_text)
            .unwrap_or(UNKNOWN_ALIAS)
    }

    fn mismatch(&self, field: &str, expected: &str, actual: &Value) -> crate::Error {
        RegistryError::FieldTypeMismatch {
            alias: self.alias().to_string(),
            field: field.to_string(),
            expected: expected.to_string(),
            actual: actual.type_name().to_string(),
        }
        .into()
    }

    /// Error for a field whose value fails validation
    pub fn invalid(&self, field: &str, reason: impl Into<String>) -> crate::Error {
        RegistryError::InvalidField {
            alias: self.alias().to_string(),
            field: field.to_string(),
            reason: reason.into(),
        }
        .into()
    }

    /// The field's value; `Null` counts as missing
    pub fn optional(&self, field: &str) -> Option<&'a Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    pub fn required(&self, field: &str) -> Result<&'a Value> {
        self.optional(field).ok_or_else(|| {
            RegistryError::MissingField {
                alias: self.alias().to_string(),
                field: field.to_string(),
            }
            .into()
        })
    }

    pub fn text(&self, field: &str) -> Result<&'a str> {
        let value = self.required(field)?;
        value
            .as_text()
            .ok_or_else(|| self.mismatch(field, "text", value))
    }

    pub fn bool(&self, field: &str) -> Result<bool> {
        let value = self.required(field)?;
        value
            .as_bool()
            .ok_or_else(|| self.mismatch(field, "bool", value))
    }

    pub fn int(&self, field: &str) -> Result<i32> {
        let value = self.required(field)?;
        value.as_int().ok_or_else(|| self.mismatch(field, "int", value))
    }

    pub fn long(&self, field: &str) -> Result<i64> {
        let value = self.required(field)?;
        value
            .as_long()
            .ok_or_else(|| self.mismatch(field, "long", value))
    }

    /// Any number, widened to a double
    pub fn float(&self, field: &str) -> Result<f64> {
        let value = self.required(field)?;
        value
            .as_f64()
            .ok_or_else(|| self.mismatch(field, "number", value))
    }

    pub fn map(&self, field: &str) -> Result<&'a Mapping> {
        let value = self.required(field)?;
        value.as_map().ok_or_else(|| self.mismatch(field, "map", value))
    }

    pub fn list(&self, field: &str) -> Result<&'a [Value]> {
        let value = self.required(field)?;
        value
            .as_list()
            .ok_or_else(|| self.mismatch(field, "list", value))
    }

    /// A nested object already rebuilt by the converter.
    ///
    /// Objects nested inside sequences are not rebuilt on load, so this only
    /// succeeds for objects reached through mappings.
    pub fn object<T: ConfigSerializable>(&self, field: &str) -> Result<&'a T> {
        let value = self.required(field)?;
        value
            .downcast_ref::<T>()
            .ok_or_else(|| self.mismatch(field, std::any::type_name::<T>(), value))
    }
}
