//! Database health check port
//!
//! Lets the readiness probe ask whether the lecture database answers
//! without knowing which database backs it.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Result of a database health probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseHealth {
    /// Whether the database answered the probe
    pub reachable: bool,
    /// Engine version reported by the database
    pub version: Option<String>,
    /// Round trip of the probe query in milliseconds
    pub response_time_ms: Option<u64>,
}

impl DatabaseHealth {
    /// A reachable database reporting the given version
    #[must_use]
    pub fn reachable(version: impl Into<String>) -> Self {
        Self {
            reachable: true,
            version: Some(version.into()),
            response_time_ms: None,
        }
    }

    /// A database that did not answer
    #[must_use]
    pub const fn unreachable() -> Self {
        Self {
            reachable: false,
            version: None,
            response_time_ms: None,
        }
    }

    /// Attach the probe round trip
    #[must_use]
    pub const fn with_response_time(mut self, ms: u64) -> Self {
        self.response_time_ms = Some(ms);
        self
    }
}

/// Port for database health checks
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DatabaseHealthPort: Send + Sync {
    /// Whether a trivial query succeeds
    async fn is_available(&self) -> bool;

    /// Run the probe and report version and latency
    async fn check_health(&self) -> Result<DatabaseHealth, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn DatabaseHealthPort>();
    }

    #[test]
    fn reachable_carries_version_and_latency() {
        let health = DatabaseHealth::reachable("3.45.1").with_response_time(3);
        assert!(health.reachable);
        assert_eq!(health.version.as_deref(), Some("3.45.1"));
        assert_eq!(health.response_time_ms, Some(3));
    }

    #[test]
    fn unreachable_has_no_details() {
        let health = DatabaseHealth::unreachable();
        assert!(!health.reachable);
        assert!(health.version.is_none());
    }
}
