//! Self-describing polymorphic objects.
//!
//! A [`ConfigSerializable`] object knows how to describe its own state as an
//! ordered [`Mapping`] of field names to values. Reconstruction goes the other way
//! through [`ConfigDeserializable`](crate::registry::ConfigDeserializable) and the
//! alias [`Registry`](crate::Registry), which maps the alias stored under the
//! discriminator key back to a constructor.

use std::{any::Any, fmt};

use crate::Mapping;

/// An object that can expand itself into a field mapping.
///
/// The mapping returned by [`serialize`](Self::serialize) holds the object's
/// fields in the order they should appear in configuration output. Field values
/// may themselves be objects; the converter expands them recursively.
///
/// Implementors must be `Clone`; the boxed-object plumbing in [`ObjectBase`] is
/// provided automatically.
///
/// # Examples
///
/// ```
/// use polyconf::{ConfigSerializable, Mapping};
///
/// #[derive(Debug, Clone)]
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
/// let fields = Point { x: 1, y: 2 }.serialize();
/// assert_eq!(fields.keys().collect::<Vec<_>>(), ["x", "y"]);
/// ```
pub trait ConfigSerializable: ObjectBase + fmt::Debug + Send + Sync {
    /// Describes the object's state as an ordered field mapping.
    fn serialize(&self) -> Mapping;
}

/// Type-erased helpers every [`ConfigSerializable`] gets for free.
///
/// Blanket-implemented for all `Clone` implementors; there is no need to
/// implement it by hand.
pub trait ObjectBase: Any {
    /// Clones the object behind a fresh box
    fn clone_object(&self) -> Box<dyn ConfigSerializable>;

    /// Borrows the object as [`Any`] for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Converts the boxed object into a boxed [`Any`] for downcasting
    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Rust type name of the concrete type, used as the fallback alias
    fn type_name(&self) -> &'static str;
}

impl<T> ObjectBase for T
where
    T: ConfigSerializable + Clone + 'static,
{
    fn clone_object(&self) -> Box<dyn ConfigSerializable> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl dyn ConfigSerializable {
    /// Returns true if the concrete type is `T`
    pub fn is<T: ConfigSerializable>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Borrows the object as `T` if that is its concrete type
    pub fn downcast_ref<T: ConfigSerializable>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Unboxes the object as `T`, or `None` if its concrete type differs.
    pub fn downcast<T: ConfigSerializable>(self: Box<Self>) -> Option<Box<T>> {
        self.into_any().downcast::<T>().ok()
    }

    /// Two objects are the same when they share a concrete type and describe
    /// identical field mappings.
    pub fn same_as(&self, other: &dyn ConfigSerializable) -> bool {
        self.as_any().type_id() == other.as_any().type_id() && self.serialize() == other.serialize()
    }
}

impl Clone for Box<dyn ConfigSerializable> {
    fn clone(&self) -> Self {
        (**self).clone_object()
    }
}
