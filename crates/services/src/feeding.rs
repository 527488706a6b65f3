//! Feeding schedule management and execution.

use std::sync::Arc;

use common::{AnimalId, ScheduleId};
use dispatcher::EventDispatcher;
use domain::{
    AnimalRepository, FeedingOccurred, FeedingSchedule, FeedingScheduleRepository, FeedingTime,
    NonEmptyString,
};

use crate::error::{Result, ServiceError};
use crate::gate::WriteGate;

/// Creates, reschedules and executes feeding schedules.
pub struct FeedingOrganizationService<A, F>
where
    A: AnimalRepository,
    F: FeedingScheduleRepository,
{
    animals: A,
    schedules: F,
    dispatcher: Arc<EventDispatcher>,
    gate: WriteGate,
}

impl<A, F> FeedingOrganizationService<A, F>
where
    A: AnimalRepository,
    F: FeedingScheduleRepository,
{
    /// Creates a new feeding service.
    pub fn new(animals: A, schedules: F, dispatcher: Arc<EventDispatcher>, gate: WriteGate) -> Self {
        Self {
            animals,
            schedules,
            dispatcher,
            gate,
        }
    }

    /// Creates an active schedule for an existing animal.
    #[tracing::instrument(skip(self))]
    pub async fn create_feeding_schedule(
        &self,
        animal_id: AnimalId,
        time: FeedingTime,
        food: NonEmptyString,
    ) -> Result<FeedingSchedule> {
        let _gate = self.gate.enter().await;

        if self.animals.get_by_id(animal_id).await?.is_none() {
            tracing::warn!(%animal_id, "cannot schedule feeding for unknown animal");
            return Err(ServiceError::AnimalNotFound(animal_id));
        }

        let schedule = FeedingSchedule::new(animal_id, time, food);
        self.schedules.add(schedule.clone()).await?;

        tracing::info!(schedule_id = %schedule.id(), "feeding schedule created");
        Ok(schedule)
    }

    /// Moves a schedule to a new time of day.
    #[tracing::instrument(skip(self))]
    pub async fn update_feeding_schedule(
        &self,
        schedule_id: ScheduleId,
        time: FeedingTime,
    ) -> Result<FeedingSchedule> {
        self.modify(schedule_id, |schedule| schedule.change_schedule(time))
            .await
    }

    /// Deactivates a schedule. Cancelling twice is harmless.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_feeding_schedule(&self, schedule_id: ScheduleId) -> Result<FeedingSchedule> {
        self.modify(schedule_id, FeedingSchedule::cancel_execution)
            .await
    }

    /// Reactivates a cancelled schedule.
    #[tracing::instrument(skip(self))]
    pub async fn restore_feeding_schedule(
        &self,
        schedule_id: ScheduleId,
    ) -> Result<FeedingSchedule> {
        self.modify(schedule_id, FeedingSchedule::restore_execution)
            .await
    }

    /// Feeds the scheduled animal and dispatches `FeedingOccurred`.
    ///
    /// Feeding does not change the animal, so the observable effects are the
    /// persistence of both entities and the dispatched event. The active flag
    /// is not consulted.
    #[tracing::instrument(skip(self))]
    pub async fn execute_feeding(&self, schedule_id: ScheduleId) -> Result<FeedingOccurred> {
        let result = self.try_execute(schedule_id).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => {
                tracing::warn!(error = %e, reason = %e.reason(), "feeding failed");
                e.reason().as_str()
            }
        };
        metrics::counter!("zoo_feedings_total", "outcome" => outcome).increment(1);

        result
    }

    async fn try_execute(&self, schedule_id: ScheduleId) -> Result<FeedingOccurred> {
        let event = {
            let _gate = self.gate.enter().await;

            let schedule = self
                .schedules
                .get_by_id(schedule_id)
                .await?
                .ok_or(ServiceError::ScheduleNotFound(schedule_id))?;
            let animal_id = schedule.animal_id();
            let mut animal = self
                .animals
                .get_by_id(animal_id)
                .await?
                .ok_or(ServiceError::AnimalNotFound(animal_id))?;

            animal.feed(schedule.food());
            let event = FeedingOccurred::new(animal_id, schedule_id, schedule.food().clone());

            self.animals.update(animal).await?;
            self.schedules.update(schedule).await?;

            event
        };

        self.dispatcher.dispatch(&event)?;

        tracing::info!(
            animal_id = %event.animal_id,
            food = %event.food,
            "feeding executed"
        );
        Ok(event)
    }

    async fn modify<M>(&self, schedule_id: ScheduleId, mutate: M) -> Result<FeedingSchedule>
    where
        M: FnOnce(&mut FeedingSchedule),
    {
        let _gate = self.gate.enter().await;

        let mut schedule = self
            .schedules
            .get_by_id(schedule_id)
            .await?
            .ok_or(ServiceError::ScheduleNotFound(schedule_id))?;

        mutate(&mut schedule);
        self.schedules.update(schedule.clone()).await?;

        Ok(schedule)
    }
}
