//! Error types for tree conversion.
//!
//! Only failures at the outermost call surface here. Failures while resolving
//! nested values are contained by the converter and never become errors.

use thiserror::Error;

/// Errors returned by [`TreeConverter`](super::TreeConverter) entry points.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The value handed to the converter has the wrong shape
    #[error("Conversion type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// The registry could not build the top-level object
    #[error("Failed to build object '{alias}': {source}")]
    ObjectConstruction {
        alias: String,
        #[source]
        source: Box<crate::Error>,
    },
}

impl ConvertError {
    /// Check if this error is related to type mismatches
    pub fn is_type_error(&self) -> bool {
        matches!(self, ConvertError::TypeMismatch { .. })
    }

    /// Check if this error came from object construction
    pub fn is_construction_error(&self) -> bool {
        matches!(self, ConvertError::ObjectConstruction { .. })
    }

    /// Check if the top-level alias was not registered
    pub fn is_not_found(&self) -> bool {
        match self {
            ConvertError::ObjectConstruction { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

// Conversion from ConvertError to the main Error type
impl From<ConvertError> for crate::Error {
    fn from(err: ConvertError) -> Self {
        crate::Error::Convert(err)
    }
}
