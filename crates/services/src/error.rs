//! Service error types.

use std::fmt;

use common::{AnimalId, EnclosureId, ScheduleId};
use dispatcher::DispatchError;
use domain::{AnimalType, EnclosureError, RepositoryError};
use thiserror::Error;

/// Coarse classification of a service failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    /// A referenced entity does not exist.
    NotFound,
    /// A domain rule rejected the operation.
    RuleViolation,
    /// The operation raced with state that changed underneath it.
    Conflict,
    /// Infrastructure failed.
    Unexpected,
}

impl FailureReason {
    /// Returns the snake_case label used in metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::NotFound => "not_found",
            FailureReason::RuleViolation => "rule_violation",
            FailureReason::Conflict => "conflict",
            FailureReason::Unexpected => "unexpected",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Animal not found.
    #[error("Animal not found: {0}")]
    AnimalNotFound(AnimalId),

    /// Enclosure not found.
    #[error("Enclosure not found: {0}")]
    EnclosureNotFound(EnclosureId),

    /// Feeding schedule not found.
    #[error("Feeding schedule not found: {0}")]
    ScheduleNotFound(ScheduleId),

    /// The enclosure is built for another kind of animal.
    #[error("Enclosure {enclosure_id} is for {enclosure_type} animals, not {animal_type}")]
    IncompatibleEnclosure {
        enclosure_id: EnclosureId,
        enclosure_type: AnimalType,
        animal_type: AnimalType,
    },

    /// The enclosure has no room left.
    #[error("Enclosure {enclosure_id} is full ({capacity} animals)")]
    EnclosureFull {
        enclosure_id: EnclosureId,
        capacity: u32,
    },

    /// Enclosure mutation error.
    #[error("Enclosure error: {0}")]
    Enclosure(#[from] EnclosureError),

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// A handler failed after the state change was persisted.
    #[error("Event dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

impl ServiceError {
    /// Classifies the error.
    pub fn reason(&self) -> FailureReason {
        match self {
            ServiceError::AnimalNotFound(_)
            | ServiceError::EnclosureNotFound(_)
            | ServiceError::ScheduleNotFound(_) => FailureReason::NotFound,
            ServiceError::IncompatibleEnclosure { .. } | ServiceError::EnclosureFull { .. } => {
                FailureReason::RuleViolation
            }
            ServiceError::Enclosure(_) => FailureReason::Conflict,
            ServiceError::Repository(_) | ServiceError::Dispatch(_) => FailureReason::Unexpected,
        }
    }
}

/// Convenience type alias for service results.
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasons_follow_error_kind() {
        assert_eq!(
            ServiceError::AnimalNotFound(AnimalId::new()).reason(),
            FailureReason::NotFound
        );
        assert_eq!(
            ServiceError::ScheduleNotFound(ScheduleId::new()).reason(),
            FailureReason::NotFound
        );
        assert_eq!(
            ServiceError::EnclosureFull {
                enclosure_id: EnclosureId::new(),
                capacity: 1,
            }
            .reason(),
            FailureReason::RuleViolation
        );
        assert_eq!(
            ServiceError::from(EnclosureError::CapacityExceeded {
                enclosure_id: EnclosureId::new(),
                capacity: 1,
            })
            .reason(),
            FailureReason::Conflict
        );
        assert_eq!(
            ServiceError::from(RepositoryError::Backend("down".into())).reason(),
            FailureReason::Unexpected
        );
    }

    #[test]
    fn incompatible_message_names_both_types() {
        let err = ServiceError::IncompatibleEnclosure {
            enclosure_id: EnclosureId::new(),
            enclosure_type: AnimalType::Herbivore,
            animal_type: AnimalType::Predator,
        };
        let message = err.to_string();
        assert!(message.contains("Herbivore"));
        assert!(message.contains("Predator"));
    }
}
