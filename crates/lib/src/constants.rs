//! Constants used throughout the polyconf library.
//!
//! This module provides central definitions for reserved mapping keys and
//! the type names reported in conversion errors.

/// Reserved mapping key marking a mapping as an encoded polymorphic object.
///
/// Its value is the alias string of the object's concrete type. Serialized
/// objects always carry it as their first key.
pub const DISCRIMINATOR_KEY: &str = "==";

/// Placeholder used in error messages when a mapping carries no usable alias.
pub const UNKNOWN_ALIAS: &str = "<unknown>";
