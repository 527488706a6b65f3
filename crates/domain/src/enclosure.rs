//! Enclosure entity.

use common::{AnimalId, EnclosureId};
use serde::{Deserialize, Serialize};

use crate::animal::Animal;
use crate::error::EnclosureError;
use crate::value_objects::{AnimalType, PositiveInteger};

/// A capacity-bounded home for animals of a single category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enclosure {
    id: EnclosureId,
    animal_type: AnimalType,
    size: PositiveInteger,
    max_capacity: PositiveInteger,
    is_cleaned: bool,
    animal_ids: Vec<AnimalId>,
}

impl Enclosure {
    /// Creates a new, empty and clean enclosure.
    pub fn new(animal_type: AnimalType, size: PositiveInteger, max_capacity: PositiveInteger) -> Self {
        Self {
            id: EnclosureId::new(),
            animal_type,
            size,
            max_capacity,
            is_cleaned: true,
            animal_ids: Vec::new(),
        }
    }
}

// Query methods
impl Enclosure {
    pub fn id(&self) -> EnclosureId {
        self.id
    }

    pub fn animal_type(&self) -> AnimalType {
        self.animal_type
    }

    pub fn size(&self) -> PositiveInteger {
        self.size
    }

    pub fn max_capacity(&self) -> PositiveInteger {
        self.max_capacity
    }

    pub fn is_cleaned(&self) -> bool {
        self.is_cleaned
    }

    /// Returns resident ids in admission order.
    pub fn animal_ids(&self) -> &[AnimalId] {
        &self.animal_ids
    }

    pub fn animal_count(&self) -> usize {
        self.animal_ids.len()
    }

    pub fn contains(&self, animal_id: AnimalId) -> bool {
        self.animal_ids.contains(&animal_id)
    }

    /// Returns true if at least one more animal fits.
    pub fn has_space(&self) -> bool {
        self.animal_count() < self.max_capacity.get() as usize
    }

    /// Returns true if the animal's category matches this enclosure.
    pub fn is_compatible_with(&self, animal: &Animal) -> bool {
        self.animal_type == animal.species().animal_type()
    }

    /// Returns true if the animal is compatible and there is room for it.
    pub fn can_transfer(&self, animal: &Animal) -> bool {
        self.is_compatible_with(animal) && self.has_space()
    }
}

// Command methods
impl Enclosure {
    /// Admits an animal.
    ///
    /// Fails without mutating when the enclosure is full. Duplicates are not
    /// checked; callers must not add the same animal twice.
    pub fn add_animal(&mut self, animal_id: AnimalId) -> Result<(), EnclosureError> {
        if !self.has_space() {
            return Err(EnclosureError::CapacityExceeded {
                enclosure_id: self.id,
                capacity: self.max_capacity.get(),
            });
        }

        self.animal_ids.push(animal_id);
        Ok(())
    }

    /// Removes the first occurrence of the animal. Absent ids are ignored.
    pub fn remove_animal(&mut self, animal_id: AnimalId) {
        if let Some(index) = self.animal_ids.iter().position(|id| *id == animal_id) {
            self.animal_ids.remove(index);
        }
    }

    pub fn clean(&mut self) {
        self.is_cleaned = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{BirthDate, Gender, HealthStatus, NonEmptyString, Species};

    fn enclosure(animal_type: AnimalType, max_capacity: i64) -> Enclosure {
        Enclosure::new(
            animal_type,
            PositiveInteger::new("size", 100).unwrap(),
            PositiveInteger::new("max capacity", max_capacity).unwrap(),
        )
    }

    fn animal(animal_type: AnimalType) -> Animal {
        Animal::new(
            Species::new(NonEmptyString::new("species", "Wolf").unwrap(), animal_type),
            NonEmptyString::new("name", "Akela").unwrap(),
            "2020-01-15".parse::<BirthDate>().unwrap(),
            Gender::Female,
            NonEmptyString::new("favorite food", "Meat").unwrap(),
            HealthStatus::Healthy,
        )
    }

    #[test]
    fn new_enclosure_is_clean_and_empty() {
        let enclosure = enclosure(AnimalType::Bird, 3);
        assert!(enclosure.is_cleaned());
        assert_eq!(enclosure.animal_count(), 0);
        assert!(enclosure.has_space());
    }

    #[test]
    fn compatibility_follows_animal_type() {
        let enclosure = enclosure(AnimalType::Predator, 2);
        assert!(enclosure.is_compatible_with(&animal(AnimalType::Predator)));
        assert!(!enclosure.is_compatible_with(&animal(AnimalType::Herbivore)));
    }

    #[test]
    fn can_transfer_requires_space() {
        let mut enclosure = enclosure(AnimalType::Predator, 1);
        let wolf = animal(AnimalType::Predator);
        assert!(enclosure.can_transfer(&wolf));

        enclosure.add_animal(AnimalId::new()).unwrap();
        assert!(!enclosure.can_transfer(&wolf));
    }

    #[test]
    fn can_transfer_rejects_incompatible_animal() {
        let enclosure = enclosure(AnimalType::Aquatic, 5);
        assert!(!enclosure.can_transfer(&animal(AnimalType::Bird)));
    }

    #[test]
    fn add_animal_on_full_enclosure_fails_without_mutation() {
        let mut enclosure = enclosure(AnimalType::Herbivore, 1);
        let resident = AnimalId::new();
        enclosure.add_animal(resident).unwrap();

        let result = enclosure.add_animal(AnimalId::new());

        assert_eq!(
            result,
            Err(EnclosureError::CapacityExceeded {
                enclosure_id: enclosure.id(),
                capacity: 1,
            })
        );
        assert_eq!(enclosure.animal_count(), 1);
        assert_eq!(enclosure.animal_ids(), &[resident]);
    }

    #[test]
    fn residents_keep_admission_order() {
        let mut enclosure = enclosure(AnimalType::Bird, 3);
        let ids = [AnimalId::new(), AnimalId::new(), AnimalId::new()];
        for id in ids {
            enclosure.add_animal(id).unwrap();
        }
        assert_eq!(enclosure.animal_ids(), &ids);
    }

    #[test]
    fn remove_animal_removes_first_match_only() {
        let mut enclosure = enclosure(AnimalType::Bird, 3);
        let id = AnimalId::new();
        enclosure.add_animal(id).unwrap();
        enclosure.add_animal(id).unwrap();

        enclosure.remove_animal(id);

        assert_eq!(enclosure.animal_count(), 1);
        assert!(enclosure.contains(id));
    }

    #[test]
    fn remove_absent_animal_is_noop() {
        let mut enclosure = enclosure(AnimalType::Bird, 3);
        let id = AnimalId::new();
        enclosure.add_animal(id).unwrap();

        enclosure.remove_animal(AnimalId::new());

        assert_eq!(enclosure.animal_ids(), &[id]);
    }

    #[test]
    fn clean_is_idempotent() {
        let mut enclosure = enclosure(AnimalType::Bird, 3);
        enclosure.clean();
        enclosure.clean();
        assert!(enclosure.is_cleaned());
    }
}
