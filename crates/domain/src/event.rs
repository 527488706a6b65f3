//! Domain events emitted by zoo entities and services.

use chrono::{DateTime, Utc};
use common::{AnimalId, EnclosureId, ScheduleId};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::value_objects::NonEmptyString;

/// Trait for domain events.
///
/// Domain events represent facts that have happened in the domain.
/// They are immutable and should be named in past tense.
pub trait DomainEvent: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Returns the event type name.
    fn event_type(&self) -> &'static str;

    /// Returns when the event happened.
    fn occurred_at(&self) -> DateTime<Utc>;
}

/// An animal was placed into an enclosure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalMoved {
    /// The animal that moved.
    pub animal_id: AnimalId,

    /// The enclosure it left, `None` on first placement.
    pub previous_enclosure_id: Option<EnclosureId>,

    /// The enclosure it now lives in.
    pub new_enclosure_id: EnclosureId,

    /// When the move happened.
    pub occurred_at: DateTime<Utc>,
}

impl AnimalMoved {
    pub fn new(
        animal_id: AnimalId,
        previous_enclosure_id: Option<EnclosureId>,
        new_enclosure_id: EnclosureId,
    ) -> Self {
        Self {
            animal_id,
            previous_enclosure_id,
            new_enclosure_id,
            occurred_at: Utc::now(),
        }
    }
}

impl DomainEvent for AnimalMoved {
    fn event_type(&self) -> &'static str {
        "AnimalMoved"
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

/// An animal was fed according to a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedingOccurred {
    /// The animal that was fed.
    pub animal_id: AnimalId,

    /// The schedule that was executed.
    pub schedule_id: ScheduleId,

    /// The food that was served.
    pub food: NonEmptyString,

    /// When the feeding happened.
    pub occurred_at: DateTime<Utc>,
}

impl FeedingOccurred {
    pub fn new(animal_id: AnimalId, schedule_id: ScheduleId, food: NonEmptyString) -> Self {
        Self {
            animal_id,
            schedule_id,
            food,
            occurred_at: Utc::now(),
        }
    }
}

impl DomainEvent for FeedingOccurred {
    fn event_type(&self) -> &'static str {
        "FeedingOccurred"
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
