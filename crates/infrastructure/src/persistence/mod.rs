//! Persistence module
//!
//! SQLite storage for lectures via sqlx.

pub mod async_connection;
pub mod database_health;
pub mod error;
pub mod lecture_store;
pub mod seed;

pub use async_connection::{AsyncDatabase, AsyncDatabaseConfig, AsyncDatabaseError};
pub use database_health::SqliteDatabaseHealth;
pub use lecture_store::SqliteLectureStore;
pub use seed::{sample_lectures, seed_sample_lectures};
