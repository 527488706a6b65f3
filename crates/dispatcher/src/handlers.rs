//! Built-in handlers that log domain events.

use domain::{AnimalMoved, FeedingOccurred};

use crate::dispatch::EventDispatcher;
use crate::error::HandlerError;
use crate::handler::EventHandler;

/// Logs every animal transfer.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnimalMovedLogger;

impl EventHandler<AnimalMoved> for AnimalMovedLogger {
    fn name(&self) -> &'static str {
        "AnimalMovedLogger"
    }

    fn handle(&self, event: &AnimalMoved) -> Result<(), HandlerError> {
        match event.previous_enclosure_id {
            Some(previous) => tracing::info!(
                animal_id = %event.animal_id,
                from = %previous,
                to = %event.new_enclosure_id,
                occurred_at = %event.occurred_at,
                "animal moved between enclosures"
            ),
            None => tracing::info!(
                animal_id = %event.animal_id,
                to = %event.new_enclosure_id,
                occurred_at = %event.occurred_at,
                "animal placed in enclosure"
            ),
        }
        Ok(())
    }
}

/// Logs every executed feeding.
#[derive(Debug, Default, Clone, Copy)]
pub struct FeedingOccurredLogger;

impl EventHandler<FeedingOccurred> for FeedingOccurredLogger {
    fn name(&self) -> &'static str {
        "FeedingOccurredLogger"
    }

    fn handle(&self, event: &FeedingOccurred) -> Result<(), HandlerError> {
        tracing::info!(
            animal_id = %event.animal_id,
            schedule_id = %event.schedule_id,
            food = %event.food,
            occurred_at = %event.occurred_at,
            "animal fed"
        );
        Ok(())
    }
}

/// Registers the logging handlers for every event the services emit.
pub fn register_default_handlers(dispatcher: &EventDispatcher) {
    dispatcher.register::<AnimalMoved, _>(AnimalMovedLogger);
    dispatcher.register::<FeedingOccurred, _>(FeedingOccurredLogger);
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{AnimalId, EnclosureId, ScheduleId};
    use domain::NonEmptyString;

    #[test]
    fn default_handlers_cover_both_events() {
        let dispatcher = EventDispatcher::new();
        register_default_handlers(&dispatcher);

        assert_eq!(dispatcher.handler_count::<AnimalMoved>(), 1);
        assert_eq!(dispatcher.handler_count::<FeedingOccurred>(), 1);
    }

    #[test]
    fn loggers_never_fail() {
        let dispatcher = EventDispatcher::new();
        register_default_handlers(&dispatcher);

        let moved = AnimalMoved::new(AnimalId::new(), Some(EnclosureId::new()), EnclosureId::new());
        let fed = FeedingOccurred::new(
            AnimalId::new(),
            ScheduleId::new(),
            NonEmptyString::new("food", "Fish").unwrap(),
        );

        assert!(dispatcher.dispatch(&moved).is_ok());
        assert!(dispatcher.dispatch(&fed).is_ok());
    }
}
