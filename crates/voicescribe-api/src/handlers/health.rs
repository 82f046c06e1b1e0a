//! Health and service status endpoints

use crate::state::AppState;
use axum::extract::State;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Timestamp of the check
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Status message
    pub message: String,
}

/// Health check endpoint for monitoring systems
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: chrono::Utc::now(),
        message: "Server is running".to_string(),
    })
}

/// Root endpoint: service status and provider capabilities
pub async fn service_status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "OK",
        "message": "voicescribe dictation backend",
        "timestamp": chrono::Utc::now(),
        "endpoints": {
            "health": "/health",
            "transcribe": "/api/transcribe",
            "transcribe_audio": "/api/transcribe-audio"
        },
        "whisper_available": state.pipeline.speech_configured(),
        "claude_available": state.pipeline.structuring_configured(),
    }))
}
