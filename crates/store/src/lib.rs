//! Storage backends for the zoo repositories.
//!
//! Only an in-memory backend is provided. Each collection is guarded by its
//! own lock, so writes to one collection are serialized while reads proceed
//! concurrently.

pub mod memory;

pub use memory::{
    InMemoryAnimalRepository, InMemoryEnclosureRepository, InMemoryFeedingScheduleRepository,
    InMemoryRepositories,
};
