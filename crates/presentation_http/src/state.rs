//! Application state shared across handlers

use std::sync::Arc;

use application::{DatabaseHealthPort, LectureService};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Lecture use cases
    pub lecture_service: Arc<LectureService>,
    /// Database reachability probe for `/ready`
    pub database_health: Arc<dyn DatabaseHealthPort>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}
