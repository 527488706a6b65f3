//! Dispatch error types.

use thiserror::Error;

/// Error type returned by event handlers.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while dispatching an event.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A handler failed. Handlers registered after it were not invoked.
    #[error("Handler '{handler}' failed on {event_type}: {source}")]
    Handler {
        handler: &'static str,
        event_type: &'static str,
        #[source]
        source: HandlerError,
    },
}
