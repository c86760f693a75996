//! Lecture scheduler HTTP presentation layer
//!
//! This crate provides the REST API, its error mapping and the server binary.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::{ApiError, set_expose_internal_errors};
pub use middleware::{JsonBody, RequestIdLayer};
pub use routes::create_router;
pub use state::AppState;
