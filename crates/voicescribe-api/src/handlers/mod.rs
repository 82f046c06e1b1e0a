//! HTTP request handlers

pub mod health;
pub mod transcribe;
pub mod upload;

use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use voicescribe_providers::ProviderError;

/// Error body shape used by every endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

/// Map a pipeline error to the wire response
///
/// Validation failures are the caller's fault (400); configuration and
/// provider failures are ours (500).
pub(crate) fn error_response(err: &ProviderError) -> (StatusCode, Json<ErrorResponse>) {
    let status = if err.is_validation() {
        warn!("rejected request: {err}");
        StatusCode::BAD_REQUEST
    } else {
        error!("request failed: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}
