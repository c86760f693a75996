//! Application services - Use case implementations

mod lecture_service;

pub use lecture_service::{LectureService, LectureServiceConfig};
