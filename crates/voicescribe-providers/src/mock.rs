//! Mock provider adapters for testing

use crate::error::{ProviderError, ProviderResult};
use crate::speech::SpeechToText;
use crate::structuring::DocumentStructurer;
use crate::types::{RawTranscript, StructuredOutcome};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use voicescribe_core::{Paragraph, StagedUpload};

/// Mock speech-to-text adapter
#[derive(Debug)]
pub struct MockSpeechToText {
    transcript: String,
    configured: bool,
    failure_status: Option<u16>,
    calls: Arc<AtomicUsize>,
}

impl MockSpeechToText {
    /// Create a mock that transcribes successfully
    pub fn new() -> Self {
        Self {
            transcript: "mock transcript".to_string(),
            configured: true,
            failure_status: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Set the transcript returned on success
    pub fn with_transcript(mut self, transcript: impl Into<String>) -> Self {
        self.transcript = transcript.into();
        self
    }

    /// Configure the mock to fail with the given provider status
    pub const fn with_failure(mut self, status: u16) -> Self {
        self.failure_status = Some(status);
        self
    }

    /// Configure the mock as having no credentials
    pub const fn unconfigured(mut self) -> Self {
        self.configured = false;
        self
    }

    /// Handle for asserting how many provider calls were made
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl Default for MockSpeechToText {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechToText for MockSpeechToText {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn transcribe(&self, _upload: &StagedUpload) -> ProviderResult<RawTranscript> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.configured {
            return Err(ProviderError::configuration(
                "speech-to-text API key is not configured",
            ));
        }
        if let Some(status) = self.failure_status {
            return Err(ProviderError::speech_to_text(status));
        }
        Ok(RawTranscript::new(self.transcript.clone()))
    }

    fn name(&self) -> &str {
        "mock-speech"
    }
}

/// Mock document structuring adapter
#[derive(Debug)]
pub struct MockStructuring {
    outcome: StructuredOutcome,
    configured: bool,
    failure: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl MockStructuring {
    /// Create a mock that returns one parsed paragraph
    pub fn new() -> Self {
        Self {
            outcome: StructuredOutcome::Parsed(vec![Paragraph::new(
                "mock summary",
                "Mock content.",
            )]),
            configured: true,
            failure: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Set the outcome returned on success
    pub fn with_outcome(mut self, outcome: StructuredOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// Configure the mock to fail with the given message
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Configure the mock as having no credentials
    pub const fn unconfigured(mut self) -> Self {
        self.configured = false;
        self
    }

    /// Handle for asserting how many provider calls were made
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl Default for MockStructuring {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStructurer for MockStructuring {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn structure(&self, _text: &str) -> ProviderResult<StructuredOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.configured {
            return Err(ProviderError::configuration(
                "structuring API key is not configured",
            ));
        }
        if let Some(message) = &self.failure {
            return Err(ProviderError::structuring(message.clone()));
        }
        Ok(self.outcome.clone())
    }

    fn name(&self) -> &str {
        "mock-structuring"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_mock_speech_counts_calls() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let upload = StagedUpload::stage(dir.path(), "a.mp3", "audio/mpeg", b"x").unwrap();

        let mock = MockSpeechToText::new().with_transcript("hello");
        let calls = mock.call_counter();

        let transcript = mock.transcribe(&upload).await.unwrap();
        assert_eq!(transcript.as_str(), "hello");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_mock_speech_failure() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let upload = StagedUpload::stage(dir.path(), "a.mp3", "audio/mpeg", b"x").unwrap();

        let mock = MockSpeechToText::new().with_failure(500);
        let err = mock.transcribe(&upload).await.unwrap_err();
        assert!(matches!(err, ProviderError::SpeechToText { status: 500 }));
    }

    #[tokio::test]
    async fn test_mock_structuring_outcomes() {
        let mock = MockStructuring::new()
            .with_outcome(StructuredOutcome::Fallback("free text".to_string()));

        let outcome = mock.structure("anything").await.unwrap();
        assert_eq!(outcome, StructuredOutcome::Fallback("free text".to_string()));

        let mock = MockStructuring::new().with_failure("boom");
        let err = mock.structure("anything").await.unwrap_err();
        assert!(matches!(err, ProviderError::Structuring { .. }));
    }

    #[test]
    fn test_mock_configuration_flags() {
        assert!(MockSpeechToText::new().is_configured());
        assert!(!MockSpeechToText::new().unconfigured().is_configured());
        assert!(MockStructuring::new().is_configured());
        assert!(!MockStructuring::new().unconfigured().is_configured());
    }
}
