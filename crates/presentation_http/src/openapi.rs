//! OpenAPI documentation module
//!
//! Provides OpenAPI 3.0 documentation for the lecture API.
//! Includes Swagger UI and ReDoc for interactive API exploration.

// Allow clippy warnings from macro-generated code in utoipa derive
#![allow(clippy::needless_for_each)]

use axum::{Router, response::Html, routing::get};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable as RedocServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::{handlers, state::AppState};

/// Path of the generated OpenAPI document
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lecture Scheduler API",
        description = "Create, read, update and delete lectures on a teaching calendar. \
                       Lecture routes are also available under the /api prefix.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Health check and readiness endpoints"),
        (name = "lectures", description = "Lecture management")
    ),
    paths(
        // Health endpoints
        handlers::health::health_check,
        handlers::health::readiness_check,
        // Lecture endpoints
        handlers::lectures::list_lectures,
        handlers::lectures::get_lecture,
        handlers::lectures::create_lecture,
        handlers::lectures::update_lecture,
        handlers::lectures::delete_lecture,
    ),
    components(
        schemas(
            // Health schemas
            handlers::health::HealthResponse,
            handlers::health::ReadinessResponse,
            handlers::health::ServiceStatus,
            // Lecture schemas
            handlers::lectures::LectureResponse,
            handlers::lectures::MaterialResponse,
            handlers::lectures::CreateLectureRequest,
            handlers::lectures::UpdateLectureRequest,
            handlers::lectures::MaterialRequest,
            handlers::lectures::ListLecturesQuery,
            // Error schemas
            crate::error::ErrorResponse,
            crate::error::FieldError,
        )
    )
)]
#[derive(Debug)]
pub struct ApiDoc;

/// Routes serving the OpenAPI document, Swagger UI and ReDoc
pub fn create_openapi_routes() -> Router<AppState> {
    let redoc = Redoc::with_url(OPENAPI_JSON_PATH, ApiDoc::openapi());

    Router::new()
        .route("/redoc", get(|| async move { Html(redoc.to_html()) }))
        // SwaggerUi also serves the JSON document itself
        .merge(SwaggerUi::new("/swagger-ui").url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
}
