//! Route definitions

use axum::{Router, routing::get};

use crate::{handlers, openapi, state::AppState};

/// Prefixes under which the lecture API is mounted
///
/// The calendar front-end talks to `/api/lectures`.
const LECTURE_PREFIXES: [&str; 2] = ["/lectures", "/api/lectures"];

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        // Health endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check));

    for prefix in LECTURE_PREFIXES {
        router = router
            .route(
                prefix,
                get(handlers::lectures::list_lectures).post(handlers::lectures::create_lecture),
            )
            .route(
                &format!("{prefix}/{{id}}"),
                get(handlers::lectures::get_lecture)
                    .put(handlers::lectures::update_lecture)
                    .delete(handlers::lectures::delete_lecture),
            );
    }

    router
        // API documentation
        .merge(openapi::create_openapi_routes())
        // Attach state
        .with_state(state)
}
