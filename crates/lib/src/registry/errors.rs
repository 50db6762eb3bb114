//! Error types for alias registry operations.

use thiserror::Error;

/// Errors raised while resolving an alias or constructing an object from a
/// discriminated mapping.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The mapping has no discriminator key
    #[error("Mapping has no '==' alias key")]
    MissingAlias,

    /// The discriminator key holds something other than text
    #[error("Alias must be text, found {actual}")]
    InvalidAlias { actual: String },

    /// No type is registered under the alias
    #[error("No type registered for alias '{alias}'")]
    UnknownAlias { alias: String },

    /// A field required by the constructor is absent
    #[error("Missing field '{field}' for '{alias}'")]
    MissingField { alias: String, field: String },

    /// A field holds a value of the wrong kind
    #[error("Field '{field}' for '{alias}': expected {expected}, found {actual}")]
    FieldTypeMismatch {
        alias: String,
        field: String,
        expected: String,
        actual: String,
    },

    /// A field is present and well-typed but its value is not acceptable
    #[error("Invalid field '{field}' for '{alias}': {reason}")]
    InvalidField {
        alias: String,
        field: String,
        reason: String,
    },

    /// The registered constructor rejected the mapping
    #[error("Failed to construct '{alias}': {source}")]
    ConstructionFailed {
        alias: String,
        #[source]
        source: Box<crate::Error>,
    },
}

impl RegistryError {
    /// Check if this error means the alias could not be resolved
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RegistryError::UnknownAlias { .. } | RegistryError::MissingAlias
        )
    }

    /// Check if this error is related to a field's type
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            RegistryError::FieldTypeMismatch { .. } | RegistryError::InvalidAlias { .. }
        )
    }

    /// Check if this error came out of a type's constructor
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            RegistryError::ConstructionFailed { .. }
                | RegistryError::MissingField { .. }
                | RegistryError::FieldTypeMismatch { .. }
                | RegistryError::InvalidField { .. }
        )
    }

    /// Get the alias involved, if any
    pub fn alias(&self) -> Option<&str> {
        match self {
            RegistryError::UnknownAlias { alias }
            | RegistryError::MissingField { alias, .. }
            | RegistryError::FieldTypeMismatch { alias, .. }
            | RegistryError::InvalidField { alias, .. }
            | RegistryError::ConstructionFailed { alias, .. } => Some(alias),
            _ => None,
        }
    }
}

// Conversion from RegistryError to the main Error type
impl From<RegistryError> for crate::Error {
    fn from(err: RegistryError) -> Self {
        crate::Error::Registry(err)
    }
}
