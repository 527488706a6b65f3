//! Feeding schedule entity.

use std::fmt;

use common::{AnimalId, ScheduleId};
use serde::{Deserialize, Serialize};

use crate::value_objects::{FeedingTime, NonEmptyString};

/// A planned daily feeding for one animal.
///
/// Schedules start active. Cancelling and restoring only flip the active
/// flag; a schedule never expires on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedingSchedule {
    id: ScheduleId,
    animal_id: AnimalId,
    time: FeedingTime,
    food: NonEmptyString,
    active: bool,
}

impl FeedingSchedule {
    pub fn new(animal_id: AnimalId, time: FeedingTime, food: NonEmptyString) -> Self {
        Self {
            id: ScheduleId::new(),
            animal_id,
            time,
            food,
            active: true,
        }
    }

    pub fn id(&self) -> ScheduleId {
        self.id
    }

    pub fn animal_id(&self) -> AnimalId {
        self.animal_id
    }

    pub fn time(&self) -> FeedingTime {
        self.time
    }

    pub fn food(&self) -> &NonEmptyString {
        &self.food
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn change_schedule(&mut self, new_time: FeedingTime) {
        self.time = new_time;
    }

    pub fn cancel_execution(&mut self) {
        self.active = false;
    }

    pub fn restore_execution(&mut self) {
        self.active = true;
    }
}

impl fmt::Display for FeedingSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Feeding schedule for animal {}: {}, Food: {}",
            self.animal_id, self.time, self.food
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> FeedingSchedule {
        FeedingSchedule::new(
            AnimalId::new(),
            FeedingTime::from_hm(9, 0).unwrap(),
            NonEmptyString::new("food", "Hay").unwrap(),
        )
    }

    #[test]
    fn new_schedule_is_active() {
        assert!(schedule().is_active());
    }

    #[test]
    fn change_schedule_overwrites_time() {
        let mut schedule = schedule();
        let evening = FeedingTime::from_hm(19, 30).unwrap();
        schedule.change_schedule(evening);
        assert_eq!(schedule.time(), evening);
    }

    #[test]
    fn cancel_then_restore_round_trips() {
        let mut schedule = schedule();
        let before = schedule.is_active();

        schedule.cancel_execution();
        assert!(!schedule.is_active());
        schedule.restore_execution();

        assert_eq!(schedule.is_active(), before);
    }

    #[test]
    fn cancel_and_restore_are_idempotent() {
        let mut schedule = schedule();
        schedule.cancel_execution();
        schedule.cancel_execution();
        assert!(!schedule.is_active());

        schedule.restore_execution();
        schedule.restore_execution();
        assert!(schedule.is_active());
    }

    #[test]
    fn display() {
        let schedule = schedule();
        assert_eq!(
            schedule.to_string(),
            format!(
                "Feeding schedule for animal {}: 09:00, Food: Hay",
                schedule.animal_id()
            )
        );
    }
}
