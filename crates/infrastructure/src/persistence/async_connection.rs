//! Async database connection using sqlx
//!
//! Provides the SQLite connection pool shared by all stores and the lazy
//! creation of the single `lectures` table.

use std::{path::Path, str::FromStr, sync::Arc};

use sqlx::{
    ConnectOptions, Connection, SqliteConnection, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::config::DatabaseConfig;

/// Schema of the lectures table
///
/// Dates are stored as `YYYY-MM-DD` and times as zero-padded `HH:MM`, so
/// text comparison orders them chronologically. Materials are a JSON array.
const LECTURES_SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS lectures (
    id                TEXT PRIMARY KEY,
    title             TEXT NOT NULL,
    instructor        TEXT NOT NULL,
    description       TEXT NOT NULL,
    full_description  TEXT,
    start_time        TEXT NOT NULL,
    end_time          TEXT NOT NULL,
    date              TEXT NOT NULL,
    category          TEXT NOT NULL,
    location          TEXT,
    max_students      INTEGER,
    enrolled_students INTEGER NOT NULL DEFAULT 0,
    materials         TEXT NOT NULL DEFAULT '[]',
    created_at        TEXT NOT NULL,
    updated_at        TEXT NOT NULL
)
";

/// Error type for async database operations
#[derive(Debug, thiserror::Error)]
pub enum AsyncDatabaseError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration for async database connection
#[derive(Debug, Clone)]
pub struct AsyncDatabaseConfig {
    /// Database URL (e.g., "sqlite:data/lectures.db" or "sqlite::memory:")
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to keep open
    pub min_connections: u32,
    /// Enable WAL mode for file databases
    pub wal_mode: bool,
}

impl Default for AsyncDatabaseConfig {
    fn default() -> Self {
        Self::from(&DatabaseConfig::default())
    }
}

impl From<&DatabaseConfig> for AsyncDatabaseConfig {
    fn from(config: &DatabaseConfig) -> Self {
        if config.is_in_memory() {
            return Self::in_memory();
        }
        Self {
            url: config.url(),
            max_connections: config.max_connections.max(1),
            min_connections: 1,
            wal_mode: true,
        }
    }
}

impl AsyncDatabaseConfig {
    /// Create an in-memory database configuration for testing
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1, // Shared-cache tables lock per connection
            min_connections: 1,
            wal_mode: false,
        }
    }

    /// Create a file-based database configuration
    #[must_use]
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self {
            url: format!("sqlite:{}", path.as_ref().display()),
            max_connections: 1,
            min_connections: 1,
            wal_mode: true,
        }
    }

    fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:")
    }
}

/// Async database connection pool
///
/// An in-memory database lives only as long as some connection to it is
/// open, so it gets an anchor connection outside the pool. Pooled
/// connections can then be reaped and reopened without losing data.
#[derive(Debug, Clone)]
pub struct AsyncDatabase {
    pool: SqlitePool,
    anchor: Option<Arc<Mutex<Option<SqliteConnection>>>>,
}

impl AsyncDatabase {
    /// Open (creating if needed) the database and its connection pool
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// database cannot be opened.
    #[instrument(skip_all, fields(url = %config.url))]
    pub async fn new(config: &AsyncDatabaseConfig) -> Result<Self, AsyncDatabaseError> {
        let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

        if let Some(parent) = options
            .get_filename()
            .parent()
            .filter(|p| !config.is_in_memory() && !p.as_os_str().is_empty())
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        // `sqlite::memory:` parses to a named shared-cache database, so the
        // anchor and the pooled connections see the same tables
        let anchor = if config.is_in_memory() {
            let conn = options.connect().await?;
            Some(Arc::new(Mutex::new(Some(conn))))
        } else {
            None
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_with(options)
            .await?;

        if config.wal_mode && !config.is_in_memory() {
            sqlx::query("PRAGMA journal_mode=WAL")
                .execute(&pool)
                .await?;
            sqlx::query("PRAGMA synchronous=NORMAL")
                .execute(&pool)
                .await?;
            debug!("WAL mode enabled");
        }

        sqlx::query("PRAGMA busy_timeout=5000")
            .execute(&pool)
            .await?;

        info!(
            max_connections = config.max_connections,
            "Async database pool created"
        );

        Ok(Self { pool, anchor })
    }

    /// Open the database described by the application config
    ///
    /// # Errors
    ///
    /// See [`AsyncDatabase::new`].
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, AsyncDatabaseError> {
        Self::new(&AsyncDatabaseConfig::from(config)).await
    }

    /// Create an in-memory database for testing
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be created.
    pub async fn in_memory() -> Result<Self, AsyncDatabaseError> {
        Self::new(&AsyncDatabaseConfig::in_memory()).await
    }

    /// Get the underlying pool for raw queries
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the lectures table if it does not exist yet
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> Result<(), AsyncDatabaseError> {
        sqlx::query(LECTURES_SCHEMA).execute(&self.pool).await?;
        debug!("Lectures table ready");
        Ok(())
    }

    /// Close all connections in the pool
    ///
    /// For an in-memory database this also releases the anchor, which
    /// discards the data.
    pub async fn close(&self) {
        self.pool.close().await;
        let anchor = match &self.anchor {
            Some(anchor) => anchor.lock().await.take(),
            None => None,
        };
        let closed = match anchor {
            Some(conn) => conn.close().await,
            None => Ok(()),
        };
        if let Err(e) = closed {
            warn!(error = %e, "Failed to close in-memory anchor connection");
        }
        debug!("Database pool closed");
    }
}
