//! Application services for the zoo.
//!
//! Services load entities through the repository contracts, apply domain
//! rules, persist the results and dispatch the events entity mutations
//! return. Cross-entity operations are serialized by a shared [`WriteGate`].

pub mod error;
pub mod feeding;
pub mod gate;
pub mod statistics;
pub mod transfer;

pub use error::{FailureReason, Result, ServiceError};
pub use feeding::FeedingOrganizationService;
pub use gate::WriteGate;
pub use statistics::{ZooStatistics, ZooStatisticsService};
pub use transfer::AnimalTransferService;
