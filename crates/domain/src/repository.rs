//! Repository contracts consumed by the application services.
//!
//! All implementations must be thread-safe (Send + Sync). Mutating
//! operations follow the same forgiving contract everywhere:
//! - `add` does nothing if an entity with the same id already exists
//! - `update` replaces the stored entity by id and silently does nothing
//!   if the id is absent
//! - `delete` does nothing if the id is absent

use async_trait::async_trait;
use common::{AnimalId, EnclosureId, ScheduleId};

use crate::animal::Animal;
use crate::enclosure::Enclosure;
use crate::error::RepositoryResult;
use crate::feeding::FeedingSchedule;
use crate::value_objects::{AnimalType, FeedingTime};

/// Storage for [`Animal`] entities.
#[async_trait]
pub trait AnimalRepository: Send + Sync {
    async fn get_by_id(&self, id: AnimalId) -> RepositoryResult<Option<Animal>>;

    /// Returns all animals in insertion order.
    async fn get_all(&self) -> RepositoryResult<Vec<Animal>>;

    /// Returns the animals whose enclosure reference equals `enclosure_id`.
    async fn get_by_enclosure(&self, enclosure_id: EnclosureId) -> RepositoryResult<Vec<Animal>>;

    async fn add(&self, animal: Animal) -> RepositoryResult<()>;

    async fn update(&self, animal: Animal) -> RepositoryResult<()>;

    async fn delete(&self, id: AnimalId) -> RepositoryResult<()>;
}

/// Storage for [`Enclosure`] entities.
#[async_trait]
pub trait EnclosureRepository: Send + Sync {
    async fn get_by_id(&self, id: EnclosureId) -> RepositoryResult<Option<Enclosure>>;

    /// Returns all enclosures in insertion order.
    async fn get_all(&self) -> RepositoryResult<Vec<Enclosure>>;

    /// Returns the enclosures accepting `animal_type`.
    async fn get_by_type(&self, animal_type: AnimalType) -> RepositoryResult<Vec<Enclosure>>;

    /// Returns the enclosures that still have room for at least one animal.
    async fn get_available(&self) -> RepositoryResult<Vec<Enclosure>>;

    async fn add(&self, enclosure: Enclosure) -> RepositoryResult<()>;

    async fn update(&self, enclosure: Enclosure) -> RepositoryResult<()>;

    async fn delete(&self, id: EnclosureId) -> RepositoryResult<()>;
}

/// Storage for [`FeedingSchedule`] entities.
#[async_trait]
pub trait FeedingScheduleRepository: Send + Sync {
    async fn get_by_id(&self, id: ScheduleId) -> RepositoryResult<Option<FeedingSchedule>>;

    /// Returns all schedules in insertion order.
    async fn get_all(&self) -> RepositoryResult<Vec<FeedingSchedule>>;

    async fn get_by_animal(&self, animal_id: AnimalId) -> RepositoryResult<Vec<FeedingSchedule>>;

    /// Returns schedules whose time lies within `start..=end`.
    async fn get_for_time_range(
        &self,
        start: FeedingTime,
        end: FeedingTime,
    ) -> RepositoryResult<Vec<FeedingSchedule>>;

    /// Returns schedules that have not been cancelled.
    async fn get_active(&self) -> RepositoryResult<Vec<FeedingSchedule>>;

    async fn add(&self, schedule: FeedingSchedule) -> RepositoryResult<()>;

    async fn update(&self, schedule: FeedingSchedule) -> RepositoryResult<()>;

    async fn delete(&self, id: ScheduleId) -> RepositoryResult<()>;
}
