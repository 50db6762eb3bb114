//! Alias registry for polymorphic objects.
//!
//! The registry maps a short alias string to a constructor, and a concrete Rust
//! type back to its alias. It is populated once at startup and then shared by
//! reference with every [`TreeConverter`](crate::TreeConverter); converters never
//! create or modify a registry.
//!
//! Types are registered under an explicit alias with [`Registry::register_as`]
//! or under their Rust type name with [`Registry::register`]. Either way the
//! type name is also accepted when decoding, so data written before an alias
//! was assigned still loads.

use std::{any::TypeId, collections::HashMap};

use tracing::debug;

use crate::{
    Mapping, Result, Value, constants::DISCRIMINATOR_KEY, object::ConfigSerializable,
};

pub mod errors;
pub mod fields;

pub use errors::RegistryError;
pub use fields::FieldReader;

/// An object that can be rebuilt from its field mapping.
///
/// The mapping passed to [`deserialize`](Self::deserialize) still contains the
/// discriminator key, and any nested objects reachable through mappings have
/// already been reconstructed. Numbers have been narrowed, so integral fields
/// arrive as `Int` or `Long`.
pub trait ConfigDeserializable: ConfigSerializable + Sized {
    /// Builds the object from its fields.
    fn deserialize(fields: &Mapping) -> Result<Self>;
}

/// Type-erased constructor stored per alias.
pub type Constructor = fn(&Mapping) -> Result<Box<dyn ConfigSerializable>>;

fn construct<T: ConfigDeserializable>(fields: &Mapping) -> Result<Box<dyn ConfigSerializable>> {
    Ok(Box::new(T::deserialize(fields)?))
}

#[derive(Debug, Clone)]
struct Registration {
    type_id: TypeId,
    construct: Constructor,
}

/// Bidirectional alias table: alias → constructor, type → alias.
///
/// # Examples
///
/// ```
/// use polyconf::{ConfigDeserializable, ConfigSerializable, Mapping, Registry, Result};
///
/// #[derive(Debug, Clone)]
/// struct Unit;
///
/// impl ConfigSerializable for Unit {
///     fn serialize(&self) -> Mapping {
///         Mapping::new()
///     }
/// }
///
/// impl ConfigDeserializable for Unit {
///     fn deserialize(_fields: &Mapping) -> Result<Self> {
///         Ok(Unit)
///     }
/// }
///
/// let registry = Registry::new().with::<Unit>("unit");
/// assert_eq!(registry.alias_for::<Unit>(), Some("unit"));
/// assert_eq!(registry.alias_of(&Unit), "unit");
/// assert!(registry.is_registered("unit"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    aliases: HashMap<TypeId, String>,
    constructors: HashMap<String, Registration>,
}

impl Registry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` under its Rust type name.
    pub fn register<T: ConfigDeserializable>(&mut self) {
        self.register_as::<T>(std::any::type_name::<T>());
    }

    /// Registers `T` under `alias`.
    ///
    /// Re-registering a type replaces its previous alias. Registering an alias
    /// already owned by another type moves the alias to `T`; the other type
    /// keeps answering to its type name.
    pub fn register_as<T: ConfigDeserializable>(&mut self, alias: impl Into<String>) {
        let alias = alias.into();
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if let Some(previous) = self.aliases.insert(type_id, alias.clone())
            && previous != alias
        {
            self.constructors.remove(&previous);
        }

        let registration = Registration {
            type_id,
            construct: construct::<T>,
        };
        if let Some(displaced) = self
            .constructors
            .insert(alias.clone(), registration.clone())
            && displaced.type_id != type_id
            && self.aliases.get(&displaced.type_id) == Some(&alias)
        {
            self.aliases.remove(&displaced.type_id);
        }
        self.constructors
            .entry(type_name.to_string())
            .or_insert(registration);

        debug!(alias = %alias, type_name, "Registered serializable type");
    }

    /// Builder form of [`register_as`](Self::register_as)
    pub fn with<T: ConfigDeserializable>(mut self, alias: impl Into<String>) -> Self {
        self.register_as::<T>(alias);
        self
    }

    /// Removes `T` and every alias it answers to.
    pub fn unregister<T: ConfigDeserializable>(&mut self) {
        let type_id = TypeId::of::<T>();
        self.aliases.remove(&type_id);
        self.constructors.retain(|_, r| r.type_id != type_id);
        debug!(type_name = std::any::type_name::<T>(), "Unregistered serializable type");
    }

    /// Removes a single alias. Returns true if it was registered.
    ///
    /// If the alias was the type's primary alias, the type falls back to its
    /// type name when serialized.
    pub fn unregister_alias(&mut self, alias: &str) -> bool {
        let Some(registration) = self.constructors.remove(alias) else {
            return false;
        };
        if self.aliases.get(&registration.type_id).map(String::as_str) == Some(alias) {
            self.aliases.remove(&registration.type_id);
        }
        debug!(alias, "Unregistered alias");
        true
    }

    /// Primary alias registered for `T`
    pub fn alias_for<T: ConfigSerializable>(&self) -> Option<&str> {
        self.aliases.get(&TypeId::of::<T>()).map(String::as_str)
    }

    /// Alias written under the discriminator key for `object`.
    ///
    /// Falls back to the Rust type name for unregistered types, so serializing
    /// never fails; decoding such data fails later if the type is still unknown.
    pub fn alias_of<'a>(&'a self, object: &'a dyn ConfigSerializable) -> &'a str {
        self.aliases
            .get(&object.as_any().type_id())
            .map(String::as_str)
            .unwrap_or_else(|| object.type_name())
    }

    /// Returns true if `alias` resolves to a constructor
    pub fn is_registered(&self, alias: &str) -> bool {
        self.constructors.contains_key(alias)
    }

    /// Every alias that resolves to a constructor, including type names
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    /// Builds an object from a mapping carrying the discriminator key.
    pub fn deserialize_object(&self, fields: &Mapping) -> Result<Box<dyn ConfigSerializable>> {
        let alias = match fields.get(DISCRIMINATOR_KEY) {
            None | Some(Value::Null) => return Err(RegistryError::MissingAlias.into()),
            Some(Value::Text(alias)) => alias,
            Some(other) => {
                return Err(RegistryError::InvalidAlias {
                    actual: other.type_name().to_string(),
                }
                .into());
            }
        };

        let registration =
            self.constructors
                .get(alias)
                .ok_or_else(|| RegistryError::UnknownAlias {
                    alias: alias.clone(),
                })?;

        (registration.construct)(fields).map_err(|e| {
            RegistryError::ConstructionFailed {
                alias: alias.clone(),
                source: Box::new(e),
            }
            .into()
        })
    }
}
