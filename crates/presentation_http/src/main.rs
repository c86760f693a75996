//! Lecture scheduler HTTP server
//!
//! Main entry point for the HTTP API server.

use std::{future::IntoFuture, sync::Arc, time::Duration};

use application::{DatabaseHealthPort, LectureService, LectureStore};
use infrastructure::{
    AppConfig, AsyncDatabase, SqliteDatabaseHealth, SqliteLectureStore, init_logging,
    seed_sample_lectures,
};
use presentation_http::{
    RequestIdLayer, routes, set_expose_internal_errors, state::AppState,
};
use tokio::{net::TcpListener, signal, sync::Notify};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration before logging so the log format applies from the start
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_logging(&config.server.log_filter, config.server.log_format)?;

    if let Some(e) = load_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    info!("📚 Lecture server v{} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        environment = %config.environment,
        host = %config.server.host,
        port = %config.server.port,
        database = %config.database.path,
        enforce_time_order = config.lectures.enforce_time_order,
        "Configuration loaded"
    );

    set_expose_internal_errors(!config.is_production());

    // Open the database
    let database = AsyncDatabase::from_config(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open database: {e}"))?;
    database
        .ensure_schema()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create schema: {e}"))?;

    let store: Arc<dyn LectureStore> = Arc::new(SqliteLectureStore::new(database.pool().clone()));

    if config.database.seed_sample_data {
        seed_sample_lectures(store.as_ref())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to seed sample lectures: {e}"))?;
    }

    // Initialize services
    let lecture_service = LectureService::new(store, config.lectures.service_config());
    let database_health: Arc<dyn DatabaseHealthPort> =
        Arc::new(SqliteDatabaseHealth::new(database.pool().clone()));

    let state = AppState {
        lecture_service: Arc::new(lecture_service),
        database_health,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = routes::create_router(state);

    // Add middleware (last added = outermost)
    let app = app.layer(RequestBodyLimitLayer::new(
        config.server.max_body_size_json_bytes,
    ));
    let app = if config.server.cors_enabled {
        app.layer(cors_layer(&config.server.allowed_origins))
    } else {
        app
    };
    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(RequestIdLayer::new());

    // Start server
    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Server listening on http://{}", addr);
    info!("📖 API docs: http://{}/swagger-ui", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let shutdown = Arc::new(Notify::new());
    let trigger = Arc::clone(&shutdown);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal(shutdown_timeout).await;
        trigger.notify_one();
    });

    // Connections still open after the timeout are dropped
    tokio::select! {
        result = server.into_future() => result?,
        () = async {
            shutdown.notified().await;
            tokio::time::sleep(shutdown_timeout).await;
        } => {
            warn!("Shutdown timeout elapsed, dropping remaining connections");
        }
    }

    database.close().await;
    info!("👋 Server shutdown complete");

    Ok(())
}

/// CORS policy: any origin when none are configured, else only the listed ones
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    use axum::http::{HeaderValue, Method};

    let methods = [Method::GET, Method::POST, Method::PUT, Method::DELETE];

    if allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            },
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(Any)
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("⏳ Waiting up to {:?} for connections to close...", timeout);
}
