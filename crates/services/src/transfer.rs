//! Moving animals between enclosures.

use std::sync::Arc;
use std::time::Instant;

use common::{AnimalId, EnclosureId};
use dispatcher::EventDispatcher;
use domain::{AnimalMoved, AnimalRepository, EnclosureRepository};

use crate::error::{Result, ServiceError};
use crate::gate::WriteGate;

/// Places animals into enclosures and moves them between enclosures.
///
/// A transfer keeps the animal's enclosure reference and the enclosures'
/// resident lists in agreement:
/// 1. Validate the target against the animal (type, free space)
/// 2. Remove the animal from its previous enclosure, if any
/// 3. Point the animal at the target and admit it there
/// 4. Persist every touched entity, then dispatch `AnimalMoved`
pub struct AnimalTransferService<A, E>
where
    A: AnimalRepository,
    E: EnclosureRepository,
{
    animals: A,
    enclosures: E,
    dispatcher: Arc<EventDispatcher>,
    gate: WriteGate,
}

impl<A, E> AnimalTransferService<A, E>
where
    A: AnimalRepository,
    E: EnclosureRepository,
{
    /// Creates a new transfer service.
    pub fn new(animals: A, enclosures: E, dispatcher: Arc<EventDispatcher>, gate: WriteGate) -> Self {
        Self {
            animals,
            enclosures,
            dispatcher,
            gate,
        }
    }

    /// Transfers an animal into the target enclosure.
    ///
    /// Validation failures leave every entity untouched. A handler failure is
    /// reported after the transfer has been persisted.
    #[tracing::instrument(skip(self))]
    pub async fn transfer_animal(
        &self,
        animal_id: AnimalId,
        target_enclosure_id: EnclosureId,
    ) -> Result<AnimalMoved> {
        let start = Instant::now();
        let result = self.try_transfer(animal_id, target_enclosure_id).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => {
                tracing::warn!(error = %e, reason = %e.reason(), "transfer rejected");
                e.reason().as_str()
            }
        };
        metrics::counter!("zoo_transfers_total", "outcome" => outcome).increment(1);
        metrics::histogram!("zoo_transfer_duration_seconds").record(start.elapsed().as_secs_f64());

        result
    }

    async fn try_transfer(
        &self,
        animal_id: AnimalId,
        target_enclosure_id: EnclosureId,
    ) -> Result<AnimalMoved> {
        let event = {
            let _gate = self.gate.enter().await;

            let mut animal = self
                .animals
                .get_by_id(animal_id)
                .await?
                .ok_or(ServiceError::AnimalNotFound(animal_id))?;
            let mut target = self
                .enclosures
                .get_by_id(target_enclosure_id)
                .await?
                .ok_or(ServiceError::EnclosureNotFound(target_enclosure_id))?;

            if !target.is_compatible_with(&animal) {
                return Err(ServiceError::IncompatibleEnclosure {
                    enclosure_id: target.id(),
                    enclosure_type: target.animal_type(),
                    animal_type: animal.species().animal_type(),
                });
            }
            if !target.has_space() {
                return Err(ServiceError::EnclosureFull {
                    enclosure_id: target.id(),
                    capacity: target.max_capacity().get(),
                });
            }

            // Apply all mutations in memory first; nothing is persisted until
            // the target has accepted the animal.
            let previous = match animal.enclosure_id() {
                Some(id) if id == target.id() => {
                    target.remove_animal(animal_id);
                    None
                }
                Some(id) => match self.enclosures.get_by_id(id).await? {
                    Some(mut enclosure) => {
                        enclosure.remove_animal(animal_id);
                        Some(enclosure)
                    }
                    None => {
                        tracing::debug!(enclosure_id = %id, "previous enclosure no longer exists");
                        None
                    }
                },
                None => None,
            };

            let event = animal.move_to_enclosure(target.id());
            target.add_animal(animal_id)?;

            if let Some(previous) = previous {
                self.enclosures.update(previous).await?;
            }
            self.animals.update(animal).await?;
            self.enclosures.update(target).await?;

            event
        };

        self.dispatcher.dispatch(&event)?;

        tracing::info!(
            animal_id = %event.animal_id,
            enclosure_id = %event.new_enclosure_id,
            "animal transferred"
        );
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{
        Animal, AnimalType, BirthDate, Enclosure, Gender, HealthStatus, NonEmptyString,
        PositiveInteger, Species,
    };
    use store::InMemoryRepositories;

    type TestService = AnimalTransferService<
        store::InMemoryAnimalRepository,
        store::InMemoryEnclosureRepository,
    >;

    fn service(repos: &InMemoryRepositories) -> TestService {
        AnimalTransferService::new(
            repos.animals.clone(),
            repos.enclosures.clone(),
            Arc::new(EventDispatcher::new()),
            WriteGate::new(),
        )
    }

    fn zebra() -> Animal {
        Animal::new(
            Species::new(
                NonEmptyString::new("species", "Zebra").unwrap(),
                AnimalType::Herbivore,
            ),
            NonEmptyString::new("name", "Marty").unwrap(),
            "2018-04-01".parse::<BirthDate>().unwrap(),
            Gender::Male,
            NonEmptyString::new("favorite food", "Grass").unwrap(),
            HealthStatus::Healthy,
        )
    }

    fn paddock(capacity: i64) -> Enclosure {
        Enclosure::new(
            AnimalType::Herbivore,
            PositiveInteger::new("size", 500).unwrap(),
            PositiveInteger::new("max capacity", capacity).unwrap(),
        )
    }

    #[tokio::test]
    async fn transfer_into_current_enclosure_keeps_single_entry() {
        let repos = InMemoryRepositories::new();
        let service = service(&repos);
        let animal = zebra();
        let enclosure = paddock(2);
        let (animal_id, enclosure_id) = (animal.id(), enclosure.id());
        repos.animals.add(animal).await.unwrap();
        repos.enclosures.add(enclosure).await.unwrap();

        service.transfer_animal(animal_id, enclosure_id).await.unwrap();
        let event = service.transfer_animal(animal_id, enclosure_id).await.unwrap();

        assert_eq!(event.previous_enclosure_id, Some(enclosure_id));
        let stored = repos.enclosures.get_by_id(enclosure_id).await.unwrap().unwrap();
        assert_eq!(stored.animal_ids(), &[animal_id]);
    }

    #[tokio::test]
    async fn missing_previous_enclosure_is_skipped() {
        let repos = InMemoryRepositories::new();
        let service = service(&repos);
        let mut animal = zebra();
        let vanished = EnclosureId::new();
        let _ = animal.move_to_enclosure(vanished);
        let target = paddock(1);
        let (animal_id, target_id) = (animal.id(), target.id());
        repos.animals.add(animal).await.unwrap();
        repos.enclosures.add(target).await.unwrap();

        let event = service.transfer_animal(animal_id, target_id).await.unwrap();

        assert_eq!(event.previous_enclosure_id, Some(vanished));
        assert_eq!(event.new_enclosure_id, target_id);
        assert_eq!(repos.enclosures.count().await, 1);
    }

    #[tokio::test]
    async fn full_enclosure_reports_capacity() {
        let repos = InMemoryRepositories::new();
        let service = service(&repos);
        let (first, second) = (zebra(), zebra());
        let enclosure = paddock(1);
        let (first_id, second_id, enclosure_id) = (first.id(), second.id(), enclosure.id());
        repos.animals.add(first).await.unwrap();
        repos.animals.add(second).await.unwrap();
        repos.enclosures.add(enclosure).await.unwrap();

        service.transfer_animal(first_id, enclosure_id).await.unwrap();
        let err = service
            .transfer_animal(second_id, enclosure_id)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::EnclosureFull { capacity: 1, .. }
        ));
    }
}
