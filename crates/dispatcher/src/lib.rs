//! Domain event dispatching for the zoo.
//!
//! This crate provides:
//! - [`EventHandler`] trait for reacting to a single domain event type
//! - [`EventDispatcher`] routing events to handlers registered for their type
//! - Logging handlers for the events emitted by the services

pub mod dispatch;
pub mod error;
pub mod handler;
pub mod handlers;

pub use dispatch::EventDispatcher;
pub use error::{DispatchError, HandlerError};
pub use handler::EventHandler;
pub use handlers::{AnimalMovedLogger, FeedingOccurredLogger, register_default_handlers};
