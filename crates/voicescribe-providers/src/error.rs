//! Error types for provider adapters and the pipeline

use thiserror::Error;

/// Result type alias for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors that can occur while running a transcription request
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Text-only request carried no usable text
    #[error("no text to transcribe")]
    EmptyInput,

    /// Audio request carried no file
    #[error("no audio file provided")]
    MissingAudio,

    /// Upload exceeds the configured size limit
    #[error("file size {size} exceeds maximum of {max} bytes")]
    PayloadTooLarge {
        /// Actual payload size
        size: u64,
        /// Maximum allowed size
        max: u64,
    },

    /// Upload MIME type and extension both failed the allow-list
    #[error("unsupported file format ({mime})")]
    UnsupportedFormat {
        /// The MIME type declared by the client
        mime: String,
    },

    /// A required provider credential is missing
    #[error("configuration error: {message}")]
    Configuration {
        /// Error message
        message: String,
    },

    /// Speech-to-text provider returned a non-success status
    #[error("speech-to-text request failed with status {status}")]
    SpeechToText {
        /// HTTP status returned by the provider
        status: u16,
    },

    /// Structuring provider call failed
    #[error("structuring request failed: {message}")]
    Structuring {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProviderError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a structuring error
    pub fn structuring(message: impl Into<String>) -> Self {
        Self::Structuring {
            message: message.into(),
        }
    }

    /// Create a speech-to-text provider error
    pub const fn speech_to_text(status: u16) -> Self {
        Self::SpeechToText { status }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(mime: impl Into<String>) -> Self {
        Self::UnsupportedFormat { mime: mime.into() }
    }

    /// Whether the error is the caller's fault (HTTP 400 class)
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput
                | Self::MissingAudio
                | Self::PayloadTooLarge { .. }
                | Self::UnsupportedFormat { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_creation() {
        let err = ProviderError::configuration("speech-to-text API key is not configured");
        assert!(matches!(err, ProviderError::Configuration { .. }));

        let err = ProviderError::speech_to_text(503);
        assert!(matches!(err, ProviderError::SpeechToText { status: 503 }));

        let err = ProviderError::unsupported_format("application/octet-stream");
        assert!(matches!(err, ProviderError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = ProviderError::speech_to_text(500);
        assert_eq!(
            format!("{err}"),
            "speech-to-text request failed with status 500"
        );

        let err = ProviderError::PayloadTooLarge {
            size: 30_000_000,
            max: 26_214_400,
        };
        let display = format!("{err}");
        assert!(display.contains("30000000"));
        assert!(display.contains("26214400"));

        let err = ProviderError::unsupported_format("application/octet-stream");
        assert_eq!(
            format!("{err}"),
            "unsupported file format (application/octet-stream)"
        );
    }

    #[test]
    fn test_is_validation() {
        assert!(ProviderError::EmptyInput.is_validation());
        assert!(ProviderError::MissingAudio.is_validation());
        assert!(
            ProviderError::PayloadTooLarge {
                size: 1,
                max: 0
            }
            .is_validation()
        );
        assert!(ProviderError::unsupported_format("text/plain").is_validation());

        assert!(!ProviderError::configuration("missing key").is_validation());
        assert!(!ProviderError::speech_to_text(500).is_validation());
        assert!(!ProviderError::structuring("boom").is_validation());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ProviderError = io_err.into();
        assert!(matches!(err, ProviderError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: ProviderError = json_err.into();
        assert!(matches!(err, ProviderError::Json(_)));
    }
}
