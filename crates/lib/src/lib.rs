//!
//! polyconf: conversion between self-describing polymorphic objects and generic
//! configuration trees.
//!
//! ## Core Concepts
//!
//! * **Objects (`object::ConfigSerializable`)**: Values of some concrete type that describe their state as an ordered field mapping.
//! * **Registry (`registry::Registry`)**: Maps short aliases to constructors and concrete types back to aliases. Built at startup, shared by reference.
//! * **Values (`value::Value`, `value::Mapping`)**: The generic configuration tree: scalars, ordered mappings, sequences.
//! * **Converter (`converter::TreeConverter`)**: Expands objects into mappings tagged with the `"=="` discriminator key and rebuilds them on load, at any nesting depth.
//! * **Nodes (`node::ConfigNode`, `node::TypeSerializer`)**: The seam to a configuration library that stores one value per node.

pub mod constants;
pub mod converter;
pub mod json;
pub mod node;
pub mod object;
pub mod registry;
pub mod value;

pub use converter::TreeConverter;
pub use node::{ConfigNode, MemoryNode, TypeSerializer};
pub use object::ConfigSerializable;
pub use registry::{ConfigDeserializable, Registry};
pub use value::{Mapping, Value};

/// Result type used throughout the polyconf library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the polyconf library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured conversion errors from the converter module
    #[error(transparent)]
    Convert(converter::ConvertError),

    /// Structured alias and construction errors from the registry module
    #[error(transparent)]
    Registry(registry::RegistryError),

    /// Errors from the serde_json bridge
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Convert(_) => "converter",
            Error::Registry(_) => "registry",
            Error::Json(_) => "json",
        }
    }

    /// Check if this error indicates an alias was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Convert(convert_err) => convert_err.is_not_found(),
            Error::Registry(registry_err) => registry_err.is_not_found(),
            Error::Json(_) => false,
        }
    }

    /// Check if this error is type-related.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Convert(convert_err) => convert_err.is_type_error(),
            Error::Registry(registry_err) => registry_err.is_type_error(),
            Error::Json(json_err) => json_err.is_data(),
        }
    }

    /// Check if this error arose while building an object.
    pub fn is_construction_error(&self) -> bool {
        match self {
            Error::Convert(convert_err) => convert_err.is_construction_error(),
            Error::Registry(registry_err) => registry_err.is_construction_error(),
            Error::Json(_) => false,
        }
    }
}
