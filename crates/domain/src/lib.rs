//! Domain layer for the zoo.
//!
//! This crate provides:
//! - Self-validating value objects (names, capacities, species, dates, times)
//! - The `Animal`, `Enclosure` and `FeedingSchedule` entities
//! - Domain events returned by entity mutations
//! - Repository contracts implemented by storage backends

pub mod animal;
pub mod enclosure;
pub mod error;
pub mod event;
pub mod feeding;
pub mod repository;
pub mod value_objects;

pub use animal::Animal;
pub use common::{AnimalId, EnclosureId, ScheduleId};
pub use enclosure::Enclosure;
pub use error::{EnclosureError, RepositoryError, RepositoryResult, ValidationError};
pub use event::{AnimalMoved, DomainEvent, FeedingOccurred};
pub use feeding::FeedingSchedule;
pub use repository::{AnimalRepository, EnclosureRepository, FeedingScheduleRepository};
pub use value_objects::{
    AnimalType, BirthDate, FeedingTime, Gender, HealthStatus, NonEmptyString, PositiveInteger,
    Species,
};
