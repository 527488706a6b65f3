//! Event dispatcher routing events to registered handlers.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use domain::DomainEvent;

use crate::error::DispatchError;
use crate::handler::EventHandler;

type ErasedHandler = Arc<dyn Fn(&dyn Any) -> Result<(), DispatchError> + Send + Sync>;

/// Delivers domain events to the handlers registered for their type.
///
/// The dispatcher is created by the composition root and shared with the
/// services through an `Arc`. It supports:
/// - Registration of any number of handlers per event type, duplicates included
/// - Synchronous delivery in registration order
/// - Propagation of the first handler failure to the caller
#[derive(Default)]
pub struct EventDispatcher {
    handlers: RwLock<HashMap<TypeId, Vec<ErasedHandler>>>,
}

impl EventDispatcher {
    /// Creates a dispatcher with no registered handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for events of type `E`.
    ///
    /// Registering the same handler twice makes it run twice per event.
    pub fn register<E, H>(&self, handler: H)
    where
        E: DomainEvent,
        H: EventHandler<E> + 'static,
    {
        let handler = Arc::new(handler);
        tracing::debug!(handler = handler.name(), "registering event handler");

        let erased: ErasedHandler = Arc::new(move |event: &dyn Any| {
            let Some(event) = event.downcast_ref::<E>() else {
                return Ok(());
            };
            handler
                .handle(event)
                .map_err(|source| DispatchError::Handler {
                    handler: handler.name(),
                    event_type: event.event_type(),
                    source,
                })
        });

        self.write()
            .entry(TypeId::of::<E>())
            .or_default()
            .push(erased);
    }

    /// Returns the number of handlers registered for events of type `E`.
    pub fn handler_count<E: DomainEvent>(&self) -> usize {
        self.read().get(&TypeId::of::<E>()).map_or(0, Vec::len)
    }

    /// Delivers an event to every handler registered for its type.
    ///
    /// Handlers are invoked in registration order on the calling task. The
    /// first failing handler stops delivery and its error is returned. With
    /// no handlers registered this is a no-op.
    pub fn dispatch<E: DomainEvent>(&self, event: &E) -> Result<(), DispatchError> {
        // Snapshot the list so handlers never run under the registry lock.
        let handlers = self
            .read()
            .get(&TypeId::of::<E>())
            .cloned()
            .unwrap_or_default();

        tracing::debug!(
            event_type = event.event_type(),
            handlers = handlers.len(),
            "dispatching event"
        );

        for handler in &handlers {
            handler(event as &dyn Any)?;
        }

        metrics::counter!("zoo_events_dispatched_total", "event_type" => event.event_type())
            .increment(1);
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<TypeId, Vec<ErasedHandler>>> {
        self.handlers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<TypeId, Vec<ErasedHandler>>> {
        self.handlers.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registered: usize = self.read().values().map(Vec::len).sum();
        f.debug_struct("EventDispatcher")
            .field("registered_handlers", &registered)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HandlerError;
    use common::{AnimalId, EnclosureId, ScheduleId};
    use domain::{AnimalMoved, FeedingOccurred, NonEmptyString};
    use std::sync::Mutex;

    /// Records the order in which handlers saw events.
    struct Recorder {
        label: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl EventHandler<AnimalMoved> for Recorder {
        fn name(&self) -> &'static str {
            self.label
        }

        fn handle(&self, _event: &AnimalMoved) -> Result<(), HandlerError> {
            self.log.lock().unwrap().push(self.label);
            Ok(())
        }
    }

    impl EventHandler<FeedingOccurred> for Recorder {
        fn name(&self) -> &'static str {
            self.label
        }

        fn handle(&self, _event: &FeedingOccurred) -> Result<(), HandlerError> {
            self.log.lock().unwrap().push(self.label);
            Ok(())
        }
    }

    struct Failing;

    impl EventHandler<AnimalMoved> for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn handle(&self, _event: &AnimalMoved) -> Result<(), HandlerError> {
            Err("enclosure sign printer offline".into())
        }
    }

    fn recorder(label: &'static str, log: &Arc<Mutex<Vec<&'static str>>>) -> Recorder {
        Recorder {
            label,
            log: Arc::clone(log),
        }
    }

    fn moved() -> AnimalMoved {
        AnimalMoved::new(AnimalId::new(), None, EnclosureId::new())
    }

    fn fed() -> FeedingOccurred {
        FeedingOccurred::new(
            AnimalId::new(),
            ScheduleId::new(),
            NonEmptyString::new("food", "Meat").unwrap(),
        )
    }

    #[test]
    fn dispatch_without_handlers_is_noop() {
        let dispatcher = EventDispatcher::new();
        assert!(dispatcher.dispatch(&moved()).is_ok());
        assert!(dispatcher.dispatch(&fed()).is_ok());
    }

    #[test]
    fn handlers_run_once_each_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = EventDispatcher::new();
        dispatcher.register::<AnimalMoved, _>(recorder("first", &log));
        dispatcher.register::<AnimalMoved, _>(recorder("second", &log));
        dispatcher.register::<AnimalMoved, _>(recorder("third", &log));

        dispatcher.dispatch(&moved()).unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn duplicate_registration_runs_twice() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = EventDispatcher::new();
        dispatcher.register::<AnimalMoved, _>(recorder("same", &log));
        dispatcher.register::<AnimalMoved, _>(recorder("same", &log));

        dispatcher.dispatch(&moved()).unwrap();

        assert_eq!(dispatcher.handler_count::<AnimalMoved>(), 2);
        assert_eq!(*log.lock().unwrap(), vec!["same", "same"]);
    }

    #[test]
    fn handlers_only_receive_their_event_type() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = EventDispatcher::new();
        dispatcher.register::<AnimalMoved, _>(recorder("moves", &log));
        dispatcher.register::<FeedingOccurred, _>(recorder("feedings", &log));

        dispatcher.dispatch(&fed()).unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["feedings"]);
        assert_eq!(dispatcher.handler_count::<AnimalMoved>(), 1);
        assert_eq!(dispatcher.handler_count::<FeedingOccurred>(), 1);
    }

    #[test]
    fn handler_failure_propagates_and_stops_delivery() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = EventDispatcher::new();
        dispatcher.register::<AnimalMoved, _>(recorder("before", &log));
        dispatcher.register::<AnimalMoved, _>(Failing);
        dispatcher.register::<AnimalMoved, _>(recorder("after", &log));

        let err = dispatcher.dispatch(&moved()).unwrap_err();

        let DispatchError::Handler {
            handler,
            event_type,
            ..
        } = &err;
        assert_eq!(*handler, "failing");
        assert_eq!(*event_type, "AnimalMoved");
        assert!(err.to_string().contains("enclosure sign printer offline"));
        assert_eq!(*log.lock().unwrap(), vec!["before"]);
    }
}
