//! Core document types for the voicescribe dictation backend

use serde::{Deserialize, Serialize};

/// One meaning-based paragraph of a structured transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// One-line summary of the paragraph
    pub summary: String,

    /// Corrected paragraph content
    pub content: String,
}

impl Paragraph {
    /// Create a new paragraph
    pub fn new(summary: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            content: content.into(),
        }
    }
}

/// The structured document returned to the caller
///
/// `raw_transcript` is only present for the audio flow; paragraph order
/// matches the source order of the corrected text and is preserved
/// end to end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptDocument {
    /// Raw speech-to-text output, omitted for text-only requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_transcript: Option<String>,

    /// Ordered paragraphs of the structured document
    pub paragraphs: Vec<Paragraph>,
}

impl TranscriptDocument {
    /// Build a document for the text-only flow (no raw transcript)
    #[must_use]
    pub const fn text_only(paragraphs: Vec<Paragraph>) -> Self {
        Self {
            raw_transcript: None,
            paragraphs,
        }
    }

    /// Build a document for the audio flow
    pub fn with_transcript(raw_transcript: impl Into<String>, paragraphs: Vec<Paragraph>) -> Self {
        Self {
            raw_transcript: Some(raw_transcript.into()),
            paragraphs,
        }
    }
}
