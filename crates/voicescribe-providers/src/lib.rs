//! Provider adapters and the transcription pipeline for voicescribe
//!
//! This crate wraps the two external providers the backend depends on (a
//! speech-to-text HTTP API and a language-model HTTP API used for document
//! structuring) behind narrow traits, and composes them into the
//! [`TranscriptionPipeline`] that implements the two request flows with
//! their degradation policy.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::uninlined_format_args,
    clippy::single_match_else
)]

pub mod error;
pub mod mock;
pub mod pipeline;
pub mod speech;
pub mod structuring;
pub mod types;

pub use error::{ProviderError, ProviderResult};
pub use pipeline::TranscriptionPipeline;
pub use speech::{SpeechToText, WhisperSpeechToText};
pub use structuring::{ClaudeStructuring, DocumentStructurer};
pub use types::{RawTranscript, StructuredOutcome};

// Re-export commonly used items
pub use mock::{MockSpeechToText, MockStructuring};
