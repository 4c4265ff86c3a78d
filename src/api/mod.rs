//! HTTP API for the libraries server

pub mod health;
pub mod libraries;
pub mod openapi;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Stored image paths are served as /files/<path>
    let files = ServeDir::new(state.services.libraries.uploads().directory());
    let max_request_bytes = state.config.uploads.max_request_bytes;

    let api = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route(
            "/libraries",
            get(libraries::list_libraries)
                .post(libraries::create_library)
                .layer(DefaultBodyLimit::max(max_request_bytes)),
        )
        .route("/libraries/:id", get(libraries::get_library))
        .with_state(state);

    Router::new()
        .merge(api)
        .nest_service("/files", files)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
