//! Transcription pipeline: composes the two provider adapters into the
//! text-only and audio request flows and applies the degradation policy.

use crate::error::{ProviderError, ProviderResult};
use crate::speech::SpeechToText;
use crate::structuring::DocumentStructurer;
use crate::types::StructuredOutcome;
use std::sync::Arc;
use tracing::{info, warn};
use voicescribe_core::{Paragraph, StagedUpload, TranscriptDocument};

/// Summary used when the structuring answer could not be parsed
pub const FALLBACK_SUMMARY: &str = "transcription result";

/// Summary used when no speech was recognized
pub const NO_RESULT_SUMMARY: &str = "no transcription result";

/// Content used when no speech was recognized
pub const NO_RESULT_CONTENT: &str = "could not recognize speech";

/// Summary used when structuring was skipped or failed
pub const DEGRADED_SUMMARY: &str = "speech-to-text result";

/// Orchestrates speech-to-text and document structuring
///
/// Audio requests walk a fixed ladder: transcribe, release the staged
/// upload, then structure. Structuring is best-effort there; any
/// failure degrades to a raw-transcript document. In the text-only flow
/// structuring is the entire purpose of the request, so its failures
/// surface to the caller.
#[derive(Clone)]
pub struct TranscriptionPipeline {
    speech: Arc<dyn SpeechToText>,
    structurer: Arc<dyn DocumentStructurer>,
}

impl std::fmt::Debug for TranscriptionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscriptionPipeline")
            .field("speech", &self.speech.name())
            .field("structurer", &self.structurer.name())
            .finish()
    }
}

impl TranscriptionPipeline {
    /// Create a pipeline from the two provider adapters
    pub fn new(speech: Arc<dyn SpeechToText>, structurer: Arc<dyn DocumentStructurer>) -> Self {
        Self { speech, structurer }
    }

    /// Whether audio transcription is available
    pub fn speech_configured(&self) -> bool {
        self.speech.is_configured()
    }

    /// Whether document structuring is available
    pub fn structuring_configured(&self) -> bool {
        self.structurer.is_configured()
    }

    /// Text-only flow: structure raw text into a document
    ///
    /// # Errors
    ///
    /// Fails on empty input, missing structuring credentials, or any
    /// structuring provider failure. There is no raw-text fallback
    /// here.
    pub async fn structure_text(&self, text: &str) -> ProviderResult<TranscriptDocument> {
        if text.trim().is_empty() {
            return Err(ProviderError::EmptyInput);
        }
        if !self.structurer.is_configured() {
            return Err(ProviderError::configuration(
                "structuring API key is not configured",
            ));
        }

        let outcome = self.structurer.structure(text).await?;
        Ok(TranscriptDocument::text_only(Self::paragraphs_from(outcome)))
    }

    /// Audio flow: transcribe a staged upload, then structure the result
    ///
    /// The staged upload is released exactly once on every exit path;
    /// on the success path it is gone before structuring starts.
    ///
    /// # Errors
    ///
    /// Fails on missing speech-to-text credentials or a speech-to-text
    /// provider failure. Structuring failures do not fail the request.
    pub async fn transcribe_upload(
        &self,
        mut upload: StagedUpload,
    ) -> ProviderResult<TranscriptDocument> {
        if !self.speech.is_configured() {
            Self::release(&mut upload);
            return Err(ProviderError::configuration(
                "speech-to-text API key is not configured",
            ));
        }

        let transcript = match self.speech.transcribe(&upload).await {
            Ok(transcript) => {
                Self::release(&mut upload);
                transcript
            }
            Err(e) => {
                Self::release(&mut upload);
                return Err(e);
            }
        };

        if transcript.is_empty() {
            info!("no speech recognized in upload");
            return Ok(TranscriptDocument::with_transcript(
                "",
                vec![Paragraph::new(NO_RESULT_SUMMARY, NO_RESULT_CONTENT)],
            ));
        }

        let raw = transcript.into_inner();

        if !self.structurer.is_configured() {
            return Ok(Self::degraded(raw));
        }

        match self.structurer.structure(&raw).await {
            Ok(outcome) => Ok(TranscriptDocument::with_transcript(
                raw,
                Self::paragraphs_from(outcome),
            )),
            Err(e) => {
                warn!("structuring unavailable, returning raw transcript: {e}");
                Ok(Self::degraded(raw))
            }
        }
    }

    /// Degraded audio response: the raw transcript as a single paragraph
    fn degraded(raw: String) -> TranscriptDocument {
        let paragraph = Paragraph::new(DEGRADED_SUMMARY, raw.clone());
        TranscriptDocument::with_transcript(raw, vec![paragraph])
    }

    fn paragraphs_from(outcome: StructuredOutcome) -> Vec<Paragraph> {
        match outcome {
            StructuredOutcome::Parsed(paragraphs) => paragraphs,
            StructuredOutcome::Fallback(text) => vec![Paragraph::new(FALLBACK_SUMMARY, text)],
        }
    }

    fn release(upload: &mut StagedUpload) {
        if let Err(e) = upload.remove() {
            warn!("failed to remove staged upload: {e}");
        }
    }
}
