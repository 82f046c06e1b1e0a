//! Text-only transcription handler

use super::error_response;
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Request body for the text-only flow
#[derive(Debug, Deserialize)]
pub struct TranscribeRequest {
    /// Raw transcript text to structure
    #[serde(default)]
    pub transcript: Option<String>,
}

/// Structure a raw text transcript into a paragraph document
///
/// Structuring is the entire purpose of this endpoint, so unlike the
/// audio flow there is no raw-text fallback: empty input is a 400 and
/// any provider failure is a 500.
pub async fn handle_transcribe(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TranscribeRequest>,
) -> Response {
    let text = request.transcript.unwrap_or_default();

    match state.pipeline.structure_text(&text).await {
        Ok(document) => {
            info!(paragraphs = document.paragraphs.len(), "transcript structured");
            (StatusCode::OK, Json(document)).into_response()
        }
        Err(e) => error_response(&e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_request_deserialization() {
        let request: TranscribeRequest =
            serde_json::from_str(r#"{"transcript": "hello"}"#).unwrap();
        assert_eq!(request.transcript.as_deref(), Some("hello"));

        let request: TranscribeRequest = serde_json::from_str("{}").unwrap();
        assert!(request.transcript.is_none());
    }
}
