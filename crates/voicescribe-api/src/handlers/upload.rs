//! Audio upload intake and transcription handler

use super::{error_response, ErrorResponse};
use crate::state::AppState;
use axum::body::Body;
use axum::extract::{FromRequest, Multipart, State};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use std::sync::Arc;
use tracing::{error, info};
use voicescribe_core::{utils, StagedUpload};
use voicescribe_providers::ProviderError;

/// Handle a multipart audio upload and run the transcription flow
///
/// Accepts one `audio` field, validates size and format against the
/// configured allow-lists, stages the payload on disk, and hands the
/// staged upload to the pipeline. The pipeline owns the staged file
/// from that point and removes it on every exit path.
pub async fn handle_transcribe_audio(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    request: Request<Body>,
) -> Response {
    // Check Content-Type header for multipart/form-data
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if !content_type.starts_with("multipart/form-data") {
        return bad_request("request must have Content-Type: multipart/form-data");
    }

    let Ok(mut multipart) = Multipart::from_request(request, &state).await else {
        return bad_request("failed to parse multipart data");
    };

    // Collect the audio field; unknown fields are ignored for
    // compatibility with permissive clients
    let mut audio_data: Option<Vec<u8>> = None;
    let mut audio_filename: Option<String> = None;
    let mut audio_mime: Option<String> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("audio") {
                    continue;
                }

                audio_filename = field.file_name().map(String::from);
                audio_mime = field.content_type().map(String::from);
                match field.bytes().await {
                    Ok(data) => audio_data = Some(data.to_vec()),
                    Err(e) => {
                        error!("failed to read audio field: {e}");
                        return bad_request("failed to read audio data");
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                error!("error parsing multipart data: {e}");
                return bad_request("invalid multipart data");
            }
        }
    }

    let Some(audio) = audio_data else {
        return error_response(&ProviderError::MissingAudio).into_response();
    };
    let filename = audio_filename.unwrap_or_else(|| "audio".to_string());
    let mime = audio_mime.unwrap_or_default();

    // Validate size against the application limit
    let max = state.config.storage.max_upload_bytes;
    if audio.len() as u64 > max {
        return error_response(&ProviderError::PayloadTooLarge {
            size: audio.len() as u64,
            max,
        })
        .into_response();
    }

    // Validate format: MIME allow-list first, filename extension as
    // fallback for generic MIME types
    let storage = &state.config.storage;
    let mime_allowed = storage.allowed_mime_types.iter().any(|m| m == &mime);
    let extension_allowed = utils::validate_file_extension(&filename, &storage.allowed_extensions);
    if !mime_allowed && !extension_allowed {
        let offending = if mime.is_empty() { "unknown" } else { mime.as_str() };
        return error_response(&ProviderError::unsupported_format(offending)).into_response();
    }

    info!(
        file = %filename,
        mime = %mime,
        size_kb = audio.len() / 1024,
        "audio upload received"
    );

    // Stage the payload; the pipeline owns it from here
    let staged = match StagedUpload::stage(&storage.staging_dir, &filename, &mime, &audio) {
        Ok(staged) => staged,
        Err(e) => {
            error!("failed to stage upload: {e}");
            return error_response(&ProviderError::Io(e)).into_response();
        }
    };

    match state.pipeline.transcribe_upload(staged).await {
        Ok(document) => {
            info!(paragraphs = document.paragraphs.len(), "audio transcribed");
            (StatusCode::OK, Json(document)).into_response()
        }
        Err(e) => error_response(&e).into_response(),
    }
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
