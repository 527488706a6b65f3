//! Shared types used across the zoo workspace.

pub mod types;

pub use types::{AnimalId, EnclosureId, ScheduleId};
