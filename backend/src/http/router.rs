//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers;
use super::openapi::{ApiDoc, OPENAPI_JSON_PATH, SWAGGER_UI_PATH};
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Permissive CORS; the API has no authentication to protect.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let collection = get(handlers::list_users).post(handlers::create_user);

    Router::new()
        .route("/health", get(handlers::health_check))
        // `/api/User` and `/api/User/` are the same collection.
        .route("/api/User", collection.clone())
        .route("/api/User/", collection)
        .route("/api/User/search", get(handlers::search_by_email))
        .route("/api/User/count", get(handlers::count_users))
        .route("/api/User/by-state/{state}", get(handlers::list_by_state))
        .route(
            "/api/User/{id}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
