//! Speech-to-text provider adapter

use crate::error::{ProviderError, ProviderResult};
use crate::types::RawTranscript;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, info};
use voicescribe_core::config::SpeechConfig;
use voicescribe_core::StagedUpload;

/// Transcription provider response format
#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: Option<String>,
}

/// Interface to a speech-to-text provider
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Whether the adapter has credentials to make provider calls
    fn is_configured(&self) -> bool;

    /// Transcribe a staged audio upload
    ///
    /// An empty transcript is a success; see [`RawTranscript::is_empty`].
    async fn transcribe(&self, upload: &StagedUpload) -> ProviderResult<RawTranscript>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Whisper API speech-to-text adapter
///
/// Posts staged audio as multipart form data with a fixed language hint
/// and JSON response format.
#[derive(Debug)]
pub struct WhisperSpeechToText {
    config: SpeechConfig,
    client: reqwest::Client,
}

impl WhisperSpeechToText {
    /// Create a new adapter from provider configuration
    pub fn new(config: SpeechConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("failed to build HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl SpeechToText for WhisperSpeechToText {
    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn transcribe(&self, upload: &StagedUpload) -> ProviderResult<RawTranscript> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(ProviderError::configuration(
                "speech-to-text API key is not configured",
            ));
        };

        let bytes = tokio::fs::read(upload.path()).await?;

        let mime = if upload.mime_type().is_empty() {
            "audio/mpeg"
        } else {
            upload.mime_type()
        };
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(upload.original_name().to_string())
            .mime_str(mime)?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.config.model.clone())
            .text("language", self.config.language.clone())
            .text("response_format", "json");

        info!(
            file = upload.original_name(),
            size_bytes = upload.size_bytes(),
            "requesting transcription"
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            error!(status = status.as_u16(), body = %body, "transcription request failed");
            return Err(ProviderError::speech_to_text(status.as_u16()));
        }

        let parsed: TranscriptionResponse = response.json().await?;
        Ok(RawTranscript::new(parsed.text.unwrap_or_default()))
    }

    fn name(&self) -> &str {
        "whisper"
    }
}
