//! Animal entity.

use common::{AnimalId, EnclosureId};
use serde::{Deserialize, Serialize};

use crate::event::AnimalMoved;
use crate::value_objects::{BirthDate, Gender, HealthStatus, NonEmptyString, Species};

/// An animal living in the zoo.
///
/// An animal is either unplaced (`enclosure_id` is `None`) or placed in
/// exactly one enclosure. The enclosure side of that relation is kept in
/// sync by the transfer service, not by the animal itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    id: AnimalId,
    species: Species,
    name: NonEmptyString,
    birth_date: BirthDate,
    gender: Gender,
    favorite_food: NonEmptyString,
    health_status: HealthStatus,
    enclosure_id: Option<EnclosureId>,
}

impl Animal {
    /// Creates a new, unplaced animal with a fresh id.
    pub fn new(
        species: Species,
        name: NonEmptyString,
        birth_date: BirthDate,
        gender: Gender,
        favorite_food: NonEmptyString,
        health_status: HealthStatus,
    ) -> Self {
        Self {
            id: AnimalId::new(),
            species,
            name,
            birth_date,
            gender,
            favorite_food,
            health_status,
            enclosure_id: None,
        }
    }
}

// Query methods
impl Animal {
    pub fn id(&self) -> AnimalId {
        self.id
    }

    pub fn species(&self) -> &Species {
        &self.species
    }

    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    pub fn birth_date(&self) -> BirthDate {
        self.birth_date
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn favorite_food(&self) -> &NonEmptyString {
        &self.favorite_food
    }

    pub fn health_status(&self) -> HealthStatus {
        self.health_status
    }

    /// Returns the enclosure the animal currently lives in.
    pub fn enclosure_id(&self) -> Option<EnclosureId> {
        self.enclosure_id
    }

    /// Returns true if the animal has been placed in an enclosure.
    pub fn is_placed(&self) -> bool {
        self.enclosure_id.is_some()
    }
}

// Command methods
impl Animal {
    /// Feeds the animal.
    ///
    /// Intentionally a no-op: the effects of a feeding (persistence and the
    /// `FeedingOccurred` event) are produced by the feeding service.
    pub fn feed(&mut self, _food: &NonEmptyString) {}

    /// Marks a sick animal as healthy. Does nothing if already healthy.
    pub fn heal(&mut self) {
        if self.health_status == HealthStatus::Sick {
            self.health_status = HealthStatus::Healthy;
        }
    }

    /// Points the animal at a new enclosure and returns the resulting event.
    ///
    /// No capacity or compatibility check happens here; the caller must have
    /// validated the move against the target enclosure first.
    pub fn move_to_enclosure(&mut self, enclosure_id: EnclosureId) -> AnimalMoved {
        let previous = self.enclosure_id.replace(enclosure_id);
        AnimalMoved::new(self.id, previous, enclosure_id)
    }
}
