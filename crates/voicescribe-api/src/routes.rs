//! API route definitions

use crate::{handlers, state::AppState};
use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

/// Body limit for audio uploads, above the application-level size check
/// so oversize payloads get a JSON error instead of a bare 413
const UPLOAD_BODY_LIMIT_BYTES: usize = 32 * 1024 * 1024;

/// Build transcription API routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/transcribe",
            post(handlers::transcribe::handle_transcribe),
        )
        .route(
            "/api/transcribe-audio",
            post(handlers::upload::handle_transcribe_audio)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT_BYTES)),
        )
        .layer(CompressionLayer::new())
}

/// Build health and status routes
pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::health::service_status))
        .route("/health", get(handlers::health::health_check))
}

/// Combine all routes into a single router
pub fn build_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(api_routes())
        .merge(health_routes())
        // The surface is consumed by a browser front-end
        .layer(CorsLayer::permissive())
        .fallback(not_found_handler)
}

/// Handle 404 Not Found errors
async fn not_found_handler() -> (axum::http::StatusCode, axum::Json<serde_json::Value>) {
    (
        axum::http::StatusCode::NOT_FOUND,
        axum::Json(serde_json::json!({
            "error": "the requested endpoint does not exist"
        })),
    )
}
