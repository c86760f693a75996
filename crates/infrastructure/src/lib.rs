//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains configuration loading, logging setup and the SQLite adapters.

pub mod config;
pub mod persistence;
pub mod telemetry;

pub use config::{AppConfig, DatabaseConfig, Environment, LecturesConfig, LogFormat, ServerConfig};
pub use persistence::{
    AsyncDatabase, AsyncDatabaseConfig, SqliteDatabaseHealth, SqliteLectureStore,
    seed_sample_lectures,
};
pub use telemetry::{TelemetryError, init_logging};
