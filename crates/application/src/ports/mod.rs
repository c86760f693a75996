//! Ports - Interfaces for external dependencies
//!
//! Ports define the contracts that adapters must implement.
//! This enables dependency inversion and testability.

mod database_health_port;
mod lecture_store;

pub use database_health_port::{DatabaseHealth, DatabaseHealthPort};
pub use lecture_store::{LectureQuery, LectureStore};

#[cfg(test)]
pub use database_health_port::MockDatabaseHealthPort;
#[cfg(test)]
pub use lecture_store::MockLectureStore;
