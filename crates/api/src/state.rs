//! Shared application state.

use std::sync::Arc;

use dispatcher::EventDispatcher;
use services::{
    AnimalTransferService, FeedingOrganizationService, WriteGate, ZooStatisticsService,
};
use store::{
    InMemoryAnimalRepository, InMemoryEnclosureRepository, InMemoryFeedingScheduleRepository,
    InMemoryRepositories,
};

pub type TransferService =
    AnimalTransferService<InMemoryAnimalRepository, InMemoryEnclosureRepository>;
pub type FeedingService =
    FeedingOrganizationService<InMemoryAnimalRepository, InMemoryFeedingScheduleRepository>;
pub type StatisticsService = ZooStatisticsService<
    InMemoryAnimalRepository,
    InMemoryEnclosureRepository,
    InMemoryFeedingScheduleRepository,
>;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub repos: InMemoryRepositories,
    pub dispatcher: Arc<EventDispatcher>,
    pub transfers: TransferService,
    pub feeding: FeedingService,
    pub statistics: StatisticsService,
    /// Held by handlers that load, mutate and store an entity directly.
    pub gate: WriteGate,
}

impl AppState {
    /// Wires the services over the given repositories.
    ///
    /// Every service shares the same gate and dispatcher.
    pub fn new(repos: InMemoryRepositories, dispatcher: Arc<EventDispatcher>) -> Self {
        let gate = WriteGate::new();
        let transfers = AnimalTransferService::new(
            repos.animals.clone(),
            repos.enclosures.clone(),
            Arc::clone(&dispatcher),
            gate.clone(),
        );
        let feeding = FeedingOrganizationService::new(
            repos.animals.clone(),
            repos.schedules.clone(),
            Arc::clone(&dispatcher),
            gate.clone(),
        );
        let statistics = ZooStatisticsService::new(
            repos.animals.clone(),
            repos.enclosures.clone(),
            repos.schedules.clone(),
        );

        Self {
            repos,
            dispatcher,
            transfers,
            feeding,
            statistics,
            gate,
        }
    }
}
