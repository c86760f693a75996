//! Application layer - Use cases and orchestration
//!
//! Contains the lecture use cases, input validation and port definitions.
//! Orchestrates domain objects and infrastructure adapters.

pub mod error;
pub mod lecture_input;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use lecture_input::{LectureChanges, LectureDraft, MaterialDraft, REQUIRED, missing_fields};
pub use ports::*;
pub use services::*;
