//! Adapter-facing types for the transcription pipeline

use voicescribe_core::Paragraph;

/// Raw speech-to-text output
///
/// An empty or whitespace-only transcript is a valid outcome, not an
/// error; [`Self::is_empty`] is the sentinel the pipeline branches on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTranscript(String);

impl RawTranscript {
    /// Wrap provider output
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Whether the provider recognized any speech at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Borrow the transcript text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the transcript text
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Result of the structuring adapter's response-shape recovery
///
/// The adapter never fails on a malformed response body; it degrades to
/// [`Self::Fallback`] carrying the full unparsed text so the caller
/// always receives readable output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuredOutcome {
    /// The provider answered with the expected paragraphs shape
    Parsed(Vec<Paragraph>),
    /// The provider ignored the requested format; full response text
    Fallback(String),
}
