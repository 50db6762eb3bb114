//! Configuration nodes and the type-serializer seam.
//!
//! A configuration library stores one [`Value`] per node. [`ConfigNode`] is the
//! minimal view of such a node the converter needs, and [`TypeSerializer`] is the
//! hook a configuration library calls to load or save a typed value at a node.

use crate::{Result, Value};

/// A node in a hierarchical configuration tree holding exactly one value.
pub trait ConfigNode {
    /// The node's current value; `Null` for a node that holds nothing
    fn value(&self) -> &Value;

    /// Replaces the node's value
    fn set_value(&mut self, value: Value);

    /// Returns true if the node holds no value
    fn is_virtual(&self) -> bool {
        self.value().is_null()
    }
}

/// Loads and saves values of type `T` at configuration nodes.
pub trait TypeSerializer<T> {
    /// Reads a `T` out of `node`
    fn deserialize_node(&self, node: &dyn ConfigNode) -> Result<T>;

    /// Writes `value` into `node`, replacing whatever it held
    fn serialize_node(&self, value: &T, node: &mut dyn ConfigNode) -> Result<()>;
}

/// A standalone in-memory [`ConfigNode`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryNode {
    value: Value,
}

impl MemoryNode {
    /// Creates a virtual node
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the value out of the node
    pub fn into_value(self) -> Value {
        self.value
    }
}

impl From<Value> for MemoryNode {
    fn from(value: Value) -> Self {
        Self { value }
    }
}

impl ConfigNode for MemoryNode {
    fn value(&self) -> &Value {
        &self.value
    }

    fn set_value(&mut self, value: Value) {
        self.value = value;
    }
}
