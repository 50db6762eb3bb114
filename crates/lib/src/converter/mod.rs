//! Conversion between polymorphic objects and configuration trees.
//!
//! [`TreeConverter`] is the only moving part of the crate. Saving an object
//! expands it into a [`Mapping`] whose first key is the discriminator
//! [`"=="`](crate::constants::DISCRIMINATOR_KEY) holding the object's alias,
//! followed by its fields. Nested objects found anywhere below, inside mappings
//! or sequences, are expanded the same way.
//!
//! Loading walks the mapping bottom-up: nested mappings are decoded first, and
//! any that carry the discriminator key are rebuilt into objects through the
//! [`Registry`]. Numbers met along the way are narrowed to the smallest integer
//! type that holds them exactly. The finished mapping is then handed to the
//! registry to build the top-level object.
//!
//! # Failure containment
//!
//! Only the outermost call can fail. A nested mapping that cannot be rebuilt
//! (unknown alias, missing fields) is left in place as a plain mapping and the
//! walk carries on with its siblings.
//!
//! # Sequences on load
//!
//! The load walk descends through mapping values only. Discriminated mappings
//! inside sequences stay plain mappings after loading, and numbers inside
//! sequences are not narrowed. Saving does descend into sequences. Data written
//! by and for other readers of this format depends on that asymmetry.
//!
//! # Resource limits
//!
//! Both walks recurse once per nesting level, so stack usage grows with the
//! depth of the input tree.

use tracing::{debug, trace};

use crate::{
    Mapping, Registry, Result, Value,
    constants::DISCRIMINATOR_KEY,
    node::{ConfigNode, TypeSerializer},
    object::ConfigSerializable,
    registry::FieldReader,
};

pub mod errors;

pub use errors::ConvertError;


/// Converts polymorphic objects to configuration values and back.
///
/// Holds nothing but a shared handle to the alias [`Registry`]; it is `Copy`
/// and can be created wherever it is needed.
///
/// # Examples
///
/// ```
/// use polyconf::{
///     ConfigDeserializable, ConfigSerializable, Mapping, Registry, Result, TreeConverter, Value,
///     registry::FieldReader,
/// };
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl ConfigSerializable for Point {
///     fn serialize(&self) -> Mapping {
///         let mut fields = Mapping::new();
///         fields.insert("x", self.x);
///         fields.insert("y", self.y);
///         fields
///     }
/// }
///
/// impl ConfigDeserializable for Point {
///     fn deserialize(fields: &Mapping) -> Result<Self> {
///         let fields = FieldReader::new(fields);
///         Ok(Point { x: fields.int("x")?, y: fields.int("y")? })
///     }
/// }
///
/// let registry = Registry::new().with::<Point>("point");
/// let converter = TreeConverter::new(&registry);
///
/// let value = converter.serialize(&Point { x: 1, y: 2 });
/// let keys: Vec<_> = value.as_map().unwrap().keys().collect();
/// assert_eq!(keys, ["==", "x", "y"]);
///
/// let point: Point = converter.deserialize_as(value).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TreeConverter<'r> {
    registry: &'r Registry,
}

impl<'r> TreeConverter<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// The registry aliases are resolved against
    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Expands `object` into a configuration value.
    ///
    /// The result is always a [`Value::Map`] containing no [`Value::Object`]
    /// anywhere below it.
    pub fn serialize(&self, object: &dyn ConfigSerializable) -> Value {
        Value::Map(self.to_mapping(object))
    }

    /// Expands `object` into its discriminated mapping.
    ///
    /// The discriminator comes first, then the object's fields in their
    /// original order with nested objects expanded. A field that is itself
    /// named `"=="` overwrites the alias but keeps the first position.
    pub fn to_mapping(&self, object: &dyn ConfigSerializable) -> Mapping {
        let mut fields = object.serialize();
        self.encode_mapping(&mut fields);

        let alias = self.registry.alias_of(object);
        trace!(alias, fields = fields.len(), "Expanded object");

        let mut mapping = Mapping::with_capacity(fields.len() + 1);
        mapping.insert(DISCRIMINATOR_KEY, alias);
        mapping.extend(fields);
        mapping
    }

    /// Rebuilds an object from a configuration value.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::TypeMismatch`] if `value` is not a mapping
    /// - [`ConvertError::ObjectConstruction`] if the registry cannot build the
    ///   top-level object
    pub fn deserialize(&self, value: Value) -> Result<Box<dyn ConfigSerializable>> {
        let mut mapping = match value {
            Value::Map(mapping) => mapping,
            other => {
                return Err(ConvertError::TypeMismatch {
                    expected: "map".to_string(),
                    actual: other.type_name().to_string(),
                }
                .into());
            }
        };

        self.decode_mapping(&mut mapping);

        self.registry.deserialize_object(&mapping).map_err(|e| {
            ConvertError::ObjectConstruction {
                alias: FieldReader::new(&mapping).alias().to_string(),
                source: Box::new(e),
            }
            .into()
        })
    }

    /// Rebuilds an object and unboxes it as `T`.
    ///
    /// Fails with [`ConvertError::TypeMismatch`] if the alias resolves to a
    /// different type.
    pub fn deserialize_as<T: ConfigSerializable>(&self, value: Value) -> Result<T> {
        let object = self.deserialize(value)?;
        let actual = object.type_name();
        object.downcast::<T>().map(|object| *object).ok_or_else(|| {
            ConvertError::TypeMismatch {
                expected: std::any::type_name::<T>().to_string(),
                actual: actual.to_string(),
            }
            .into()
        })
    }

    fn encode_mapping(&self, mapping: &mut Mapping) {
        for value in mapping.values_mut() {
            self.encode_value(value);
        }
    }

    fn encode_list(&self, list: &mut [Value]) {
        for value in list {
            self.encode_value(value);
        }
    }

    fn encode_value(&self, value: &mut Value) {
        match value {
            Value::Map(mapping) => self.encode_mapping(mapping),
            Value::List(list) => self.encode_list(list),
            Value::Object(object) => {
                let expanded = self.to_mapping(object.as_ref());
                *value = Value::Map(expanded);
            }
            _ => {}
        }
    }

    pub(crate) fn decode_mapping(&self, mapping: &mut Mapping) {
        for (key, value) in mapping.iter_mut() {
            if let Err(e) = self.resolve_nested(value) {
                debug!(key, error = %e, "Leaving nested mapping unresolved");
            }
            narrow_number(value);
        }
    }

    /// Decodes a nested mapping in place and rebuilds it into an object if it
    /// is discriminated. On error the value stays a (decoded) mapping.
    fn resolve_nested(&self, value: &mut Value) -> Result<()> {
        let Value::Map(inner) = value else {
            return Ok(());
        };

        self.decode_mapping(inner);

        if inner.contains_key(DISCRIMINATOR_KEY) {
            let object = self.registry.deserialize_object(inner)?;
            *value = Value::Object(object);
        }
        Ok(())
    }
}

impl TypeSerializer<Box<dyn ConfigSerializable>> for TreeConverter<'_> {
    fn deserialize_node(&self, node: &dyn ConfigNode) -> Result<Box<dyn ConfigSerializable>> {
        self.deserialize(node.value().clone())
    }

    fn serialize_node(
        &self,
        value: &Box<dyn ConfigSerializable>,
        node: &mut dyn ConfigNode,
    ) -> Result<()> {
        node.set_value(self.serialize(value.as_ref()));
        Ok(())
    }
}

/// Replaces a number with the narrowest of `Int`, `Long` or `Float` that holds
/// it exactly. Non-numbers are left alone.
///
/// The check casts the double down and back up rather than range-testing, so
/// `2.5` stays a float. `Long` values beyond 2^53 are rounded by the trip
/// through `f64`.
pub(crate) fn narrow_number(value: &mut Value) {
    let Some(number) = value.as_f64() else {
        return;
    };

    *value = if f64::from(number as i32) == number {
        Value::Int(number as i32)
    } else if number as i64 as f64 == number {
        Value::Long(number as i64)
    } else {
        Value::Float(number)
    };
}
