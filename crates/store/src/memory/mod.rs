//! In-memory repository implementations.
//!
//! These provide the same interface as any external backend and are used
//! by the HTTP server and by tests. Clones of a repository share storage.

mod collection;

use async_trait::async_trait;
use common::{AnimalId, EnclosureId, ScheduleId};
use domain::{
    Animal, AnimalRepository, AnimalType, Enclosure, EnclosureRepository, FeedingSchedule,
    FeedingScheduleRepository, FeedingTime, RepositoryResult,
};

use collection::{Collection, Stored};

impl Stored for Animal {
    type Id = AnimalId;
    const KIND: &'static str = "animal";

    fn key(&self) -> AnimalId {
        self.id()
    }
}

impl Stored for Enclosure {
    type Id = EnclosureId;
    const KIND: &'static str = "enclosure";

    fn key(&self) -> EnclosureId {
        self.id()
    }
}

impl Stored for FeedingSchedule {
    type Id = ScheduleId;
    const KIND: &'static str = "feeding schedule";

    fn key(&self) -> ScheduleId {
        self.id()
    }
}

/// In-memory animal storage.
#[derive(Clone, Default)]
pub struct InMemoryAnimalRepository {
    animals: Collection<Animal>,
}

impl InMemoryAnimalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored animals.
    pub async fn count(&self) -> usize {
        self.animals.len().await
    }

    pub async fn clear(&self) {
        self.animals.clear().await;
    }
}

#[async_trait]
impl AnimalRepository for InMemoryAnimalRepository {
    async fn get_by_id(&self, id: AnimalId) -> RepositoryResult<Option<Animal>> {
        Ok(self.animals.get(id).await)
    }

    async fn get_all(&self) -> RepositoryResult<Vec<Animal>> {
        Ok(self.animals.all().await)
    }

    async fn get_by_enclosure(&self, enclosure_id: EnclosureId) -> RepositoryResult<Vec<Animal>> {
        Ok(self
            .animals
            .filter(|animal| animal.enclosure_id() == Some(enclosure_id))
            .await)
    }

    async fn add(&self, animal: Animal) -> RepositoryResult<()> {
        self.animals.insert(animal).await;
        Ok(())
    }

    async fn update(&self, animal: Animal) -> RepositoryResult<()> {
        self.animals.replace(animal).await;
        Ok(())
    }

    async fn delete(&self, id: AnimalId) -> RepositoryResult<()> {
        self.animals.remove(id).await;
        Ok(())
    }
}

/// In-memory enclosure storage.
#[derive(Clone, Default)]
pub struct InMemoryEnclosureRepository {
    enclosures: Collection<Enclosure>,
}

impl InMemoryEnclosureRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored enclosures.
    pub async fn count(&self) -> usize {
        self.enclosures.len().await
    }

    pub async fn clear(&self) {
        self.enclosures.clear().await;
    }
}

#[async_trait]
impl EnclosureRepository for InMemoryEnclosureRepository {
    async fn get_by_id(&self, id: EnclosureId) -> RepositoryResult<Option<Enclosure>> {
        Ok(self.enclosures.get(id).await)
    }

    async fn get_all(&self) -> RepositoryResult<Vec<Enclosure>> {
        Ok(self.enclosures.all().await)
    }

    async fn get_by_type(&self, animal_type: AnimalType) -> RepositoryResult<Vec<Enclosure>> {
        Ok(self
            .enclosures
            .filter(|enclosure| enclosure.animal_type() == animal_type)
            .await)
    }

    async fn get_available(&self) -> RepositoryResult<Vec<Enclosure>> {
        Ok(self.enclosures.filter(Enclosure::has_space).await)
    }

    async fn add(&self, enclosure: Enclosure) -> RepositoryResult<()> {
        self.enclosures.insert(enclosure).await;
        Ok(())
    }

    async fn update(&self, enclosure: Enclosure) -> RepositoryResult<()> {
        self.enclosures.replace(enclosure).await;
        Ok(())
    }

    async fn delete(&self, id: EnclosureId) -> RepositoryResult<()> {
        self.enclosures.remove(id).await;
        Ok(())
    }
}

/// In-memory feeding schedule storage.
#[derive(Clone, Default)]
pub struct InMemoryFeedingScheduleRepository {
    schedules: Collection<FeedingSchedule>,
}

impl InMemoryFeedingScheduleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored schedules.
    pub async fn count(&self) -> usize {
        self.schedules.len().await
    }

    pub async fn clear(&self) {
        self.schedules.clear().await;
    }
}

#[async_trait]
impl FeedingScheduleRepository for InMemoryFeedingScheduleRepository {
    async fn get_by_id(&self, id: ScheduleId) -> RepositoryResult<Option<FeedingSchedule>> {
        Ok(self.schedules.get(id).await)
    }

    async fn get_all(&self) -> RepositoryResult<Vec<FeedingSchedule>> {
        Ok(self.schedules.all().await)
    }

    async fn get_by_animal(&self, animal_id: AnimalId) -> RepositoryResult<Vec<FeedingSchedule>> {
        Ok(self
            .schedules
            .filter(|schedule| schedule.animal_id() == animal_id)
            .await)
    }

    async fn get_for_time_range(
        &self,
        start: FeedingTime,
        end: FeedingTime,
    ) -> RepositoryResult<Vec<FeedingSchedule>> {
        Ok(self
            .schedules
            .filter(|schedule| schedule.time() >= start && schedule.time() <= end)
            .await)
    }

    async fn get_active(&self) -> RepositoryResult<Vec<FeedingSchedule>> {
        Ok(self.schedules.filter(FeedingSchedule::is_active).await)
    }

    async fn add(&self, schedule: FeedingSchedule) -> RepositoryResult<()> {
        self.schedules.insert(schedule).await;
        Ok(())
    }

    async fn update(&self, schedule: FeedingSchedule) -> RepositoryResult<()> {
        self.schedules.replace(schedule).await;
        Ok(())
    }

    async fn delete(&self, id: ScheduleId) -> RepositoryResult<()> {
        self.schedules.remove(id).await;
        Ok(())
    }
}

/// The three in-memory repositories, created together.
#[derive(Clone, Default)]
pub struct InMemoryRepositories {
    pub animals: InMemoryAnimalRepository,
    pub enclosures: InMemoryEnclosureRepository,
    pub schedules: InMemoryFeedingScheduleRepository,
}

impl InMemoryRepositories {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Gender, HealthStatus, NonEmptyString, PositiveInteger, Species};

    fn animal(name: &str, animal_type: AnimalType) -> Animal {
        Animal::new(
            Species::new(NonEmptyString::new("species", "Any").unwrap(), animal_type),
            NonEmptyString::new("name", name).unwrap(),
            "2021-03-03".parse().unwrap(),
            Gender::Male,
            NonEmptyString::new("favorite food", "Food").unwrap(),
            HealthStatus::Healthy,
        )
    }

    fn enclosure(animal_type: AnimalType, max_capacity: i64) -> Enclosure {
        Enclosure::new(
            animal_type,
            PositiveInteger::new("size", 10).unwrap(),
            PositiveInteger::new("max capacity", max_capacity).unwrap(),
        )
    }

    fn schedule(animal_id: AnimalId, hour: u32) -> FeedingSchedule {
        FeedingSchedule::new(
            animal_id,
            FeedingTime::from_hm(hour, 0).unwrap(),
            NonEmptyString::new("food", "Seeds").unwrap(),
        )
    }

    #[tokio::test]
    async fn add_and_get_by_id() {
        let repo = InMemoryAnimalRepository::new();
        let lion = animal("Leo", AnimalType::Predator);

        repo.add(lion.clone()).await.unwrap();

        assert_eq!(repo.get_by_id(lion.id()).await.unwrap(), Some(lion));
        assert_eq!(repo.get_by_id(AnimalId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn add_is_idempotent_per_id() {
        let repo = InMemoryAnimalRepository::new();
        let lion = animal("Leo", AnimalType::Predator);

        repo.add(lion.clone()).await.unwrap();
        let mut moved = lion.clone();
        moved.move_to_enclosure(EnclosureId::new());
        repo.add(moved).await.unwrap();

        assert_eq!(repo.count().await, 1);
        let stored = repo.get_by_id(lion.id()).await.unwrap().unwrap();
        assert_eq!(stored.enclosure_id(), None);
    }

    #[tokio::test]
    async fn get_all_preserves_insertion_order() {
        let repo = InMemoryAnimalRepository::new();
        let names = ["A", "B", "C"];
        for name in names {
            repo.add(animal(name, AnimalType::Bird)).await.unwrap();
        }

        let all = repo.get_all().await.unwrap();
        let stored: Vec<&str> = all.iter().map(|a| a.name().as_str()).collect();
        assert_eq!(stored, names);
    }

    #[tokio::test]
    async fn update_replaces_in_place() {
        let repo = InMemoryAnimalRepository::new();
        let first = animal("First", AnimalType::Bird);
        let mut second = animal("Second", AnimalType::Bird);
        repo.add(first.clone()).await.unwrap();
        repo.add(second.clone()).await.unwrap();

        let target = EnclosureId::new();
        second.move_to_enclosure(target);
        repo.update(second.clone()).await.unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[tokio::test]
    async fn update_of_absent_id_is_silent_noop() {
        let repo = InMemoryAnimalRepository::new();
        let stored = animal("Stored", AnimalType::Aquatic);
        repo.add(stored.clone()).await.unwrap();

        let result = repo.update(animal("Ghost", AnimalType::Aquatic)).await;

        assert!(result.is_ok());
        assert_eq!(repo.get_all().await.unwrap(), vec![stored]);
    }

    #[tokio::test]
    async fn enclosure_update_of_absent_id_is_silent_noop() {
        let repo = InMemoryEnclosureRepository::new();
        let result = repo.update(enclosure(AnimalType::Bird, 2)).await;

        assert!(result.is_ok());
        assert_eq!(repo.count().await, 0);
    }

    #[tokio::test]
    async fn delete_removes_and_ignores_absent() {
        let repo = InMemoryAnimalRepository::new();
        let lion = animal("Leo", AnimalType::Predator);
        repo.add(lion.clone()).await.unwrap();

        repo.delete(AnimalId::new()).await.unwrap();
        assert_eq!(repo.count().await, 1);

        repo.delete(lion.id()).await.unwrap();
        assert_eq!(repo.count().await, 0);
    }

    #[tokio::test]
    async fn get_by_enclosure_filters_on_reference() {
        let repo = InMemoryAnimalRepository::new();
        let enclosure_id = EnclosureId::new();

        let mut placed = animal("Placed", AnimalType::Herbivore);
        placed.move_to_enclosure(enclosure_id);
        repo.add(placed.clone()).await.unwrap();
        repo.add(animal("Unplaced", AnimalType::Herbivore))
            .await
            .unwrap();

        let residents = repo.get_by_enclosure(enclosure_id).await.unwrap();
        assert_eq!(residents, vec![placed]);
    }

    #[tokio::test]
    async fn enclosure_queries() {
        let repo = InMemoryEnclosureRepository::new();
        let mut full = enclosure(AnimalType::Predator, 1);
        full.add_animal(AnimalId::new()).unwrap();
        let open = enclosure(AnimalType::Predator, 3);
        let aviary = enclosure(AnimalType::Bird, 3);

        repo.add(full.clone()).await.unwrap();
        repo.add(open.clone()).await.unwrap();
        repo.add(aviary.clone()).await.unwrap();

        let predators = repo.get_by_type(AnimalType::Predator).await.unwrap();
        assert_eq!(predators, vec![full, open.clone()]);

        let available = repo.get_available().await.unwrap();
        assert_eq!(available, vec![open, aviary]);
    }

    #[tokio::test]
    async fn schedule_queries() {
        let repo = InMemoryFeedingScheduleRepository::new();
        let animal_id = AnimalId::new();
        let morning = schedule(animal_id, 8);
        let noon = schedule(animal_id, 12);
        let mut evening = schedule(AnimalId::new(), 18);
        evening.cancel_execution();

        repo.add(morning.clone()).await.unwrap();
        repo.add(noon.clone()).await.unwrap();
        repo.add(evening.clone()).await.unwrap();

        let by_animal = repo.get_by_animal(animal_id).await.unwrap();
        assert_eq!(by_animal, vec![morning.clone(), noon.clone()]);

        let range = repo
            .get_for_time_range(
                FeedingTime::from_hm(8, 0).unwrap(),
                FeedingTime::from_hm(12, 0).unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(range, vec![morning.clone(), noon.clone()]);

        let active = repo.get_active().await.unwrap();
        assert_eq!(active, vec![morning, noon]);
    }

    #[tokio::test]
    async fn clones_share_storage() {
        let repos = InMemoryRepositories::new();
        let clone = repos.clone();

        clone
            .enclosures
            .add(enclosure(AnimalType::Aquatic, 4))
            .await
            .unwrap();

        assert_eq!(repos.enclosures.count().await, 1);
        repos.enclosures.clear().await;
        assert_eq!(clone.enclosures.count().await, 0);
    }
}
