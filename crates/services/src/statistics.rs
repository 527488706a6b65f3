//! Read-only counts over the zoo's collections.

use std::collections::BTreeMap;

use domain::{AnimalRepository, EnclosureRepository, FeedingScheduleRepository};
use serde::Serialize;

use crate::error::Result;

/// Dashboard counts, keyed by variant name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZooStatistics {
    pub total_animals: usize,
    /// Only types with at least one animal appear.
    pub animals_by_type: BTreeMap<String, usize>,
    /// Only statuses with at least one animal appear.
    pub animals_by_health: BTreeMap<String, usize>,
    pub total_enclosures: usize,
    pub total_feeding_schedules: usize,
}

pub struct ZooStatisticsService<A, E, F>
where
    A: AnimalRepository,
    E: EnclosureRepository,
    F: FeedingScheduleRepository,
{
    animals: A,
    enclosures: E,
    schedules: F,
}

impl<A, E, F> ZooStatisticsService<A, E, F>
where
    A: AnimalRepository,
    E: EnclosureRepository,
    F: FeedingScheduleRepository,
{
    pub fn new(animals: A, enclosures: E, schedules: F) -> Self {
        Self {
            animals,
            enclosures,
            schedules,
        }
    }

    pub async fn total_animal_count(&self) -> Result<usize> {
        Ok(self.animals.get_all().await?.len())
    }

    pub async fn animal_count_by_type(&self) -> Result<BTreeMap<String, usize>> {
        let animals = self.animals.get_all().await?;
        Ok(tally(
            animals
                .iter()
                .map(|animal| animal.species().animal_type().as_str()),
        ))
    }

    pub async fn animal_count_by_health(&self) -> Result<BTreeMap<String, usize>> {
        let animals = self.animals.get_all().await?;
        Ok(tally(animals.iter().map(|animal| animal.health_status().as_str())))
    }

    pub async fn total_enclosure_count(&self) -> Result<usize> {
        Ok(self.enclosures.get_all().await?.len())
    }

    pub async fn total_feeding_schedule_count(&self) -> Result<usize> {
        Ok(self.schedules.get_all().await?.len())
    }

    /// Collects every count into one value.
    #[tracing::instrument(skip(self))]
    pub async fn snapshot(&self) -> Result<ZooStatistics> {
        Ok(ZooStatistics {
            total_animals: self.total_animal_count().await?,
            animals_by_type: self.animal_count_by_type().await?,
            animals_by_health: self.animal_count_by_health().await?,
            total_enclosures: self.total_enclosure_count().await?,
            total_feeding_schedules: self.total_feeding_schedule_count().await?,
        })
    }
}

fn tally<'a>(names: impl Iterator<Item = &'a str>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for name in names {
        *counts.entry(name.to_string()).or_insert(0) += 1;
    }
    counts
}
