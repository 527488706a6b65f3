//! Core event handler trait.

use domain::DomainEvent;

use crate::error::HandlerError;

/// Reacts to one type of domain event.
///
/// Handlers run synchronously on the dispatching task, so a slow handler
/// delays the operation that emitted the event.
pub trait EventHandler<E: DomainEvent>: Send + Sync {
    /// Returns the name of this handler, used in logs and errors.
    fn name(&self) -> &'static str;

    /// Handles a single event.
    fn handle(&self, event: &E) -> Result<(), HandlerError>;
}
