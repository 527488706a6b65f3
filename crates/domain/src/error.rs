//! Domain error types.

use common::EnclosureId;
use thiserror::Error;

/// A value object was constructed from an invalid primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The string was empty or whitespace only.
    #[error("{field} cannot be empty")]
    EmptyString { field: &'static str },

    /// The integer was zero or negative.
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: i64 },

    /// The integer does not fit the stored representation.
    #[error("{field} is too large: {value}")]
    TooLarge { field: &'static str, value: i64 },

    /// The name is not one of the variants of a closed enumeration.
    #[error("Invalid {field}: '{value}'")]
    UnknownVariant { field: &'static str, value: String },

    /// The text could not be parsed into the expected format.
    #[error("Invalid {field}: '{value}' (expected {expected})")]
    Format {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl ValidationError {
    /// Returns the name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyString { field }
            | ValidationError::NotPositive { field, .. }
            | ValidationError::TooLarge { field, .. }
            | ValidationError::UnknownVariant { field, .. }
            | ValidationError::Format { field, .. } => field,
        }
    }
}

/// Errors raised by enclosure mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnclosureError {
    /// The enclosure already holds its maximum number of animals.
    #[error("Enclosure {enclosure_id} is at maximum capacity ({capacity})")]
    CapacityExceeded {
        enclosure_id: EnclosureId,
        capacity: u32,
    },
}

/// Errors reported by repository implementations.
///
/// The in-memory repositories never fail; external backends map their
/// failures into this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The storage backend failed.
    #[error("Repository backend error: {0}")]
    Backend(String),
}

/// Result type for repository operations.
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;
