//! Lecture rules configuration.

use application::LectureServiceConfig;
use serde::{Deserialize, Serialize};

/// Business rules applied to lectures
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LecturesConfig {
    /// Reject lectures that do not start before they end (default: false)
    #[serde(default)]
    pub enforce_time_order: bool,
}

impl LecturesConfig {
    /// Settings for the lecture service
    #[must_use]
    pub const fn service_config(&self) -> LectureServiceConfig {
        LectureServiceConfig {
            enforce_time_order: self.enforce_time_order,
        }
    }
}
