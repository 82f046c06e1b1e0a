//! Configuration management for the voicescribe dictation backend

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Upload staging configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Speech-to-text provider configuration
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Document structuring provider configuration
    #[serde(default)]
    pub structuring: StructuringConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Upload staging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory where uploads are staged for the duration of a request
    #[serde(default = "default_staging_dir")]
    pub staging_dir: PathBuf,

    /// Maximum upload size in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,

    /// Allowed file extensions
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,

    /// Allowed MIME types
    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,
}

/// Speech-to-text provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Provider API key; absence disables audio transcription
    #[serde(default = "default_speech_api_key")]
    pub api_key: Option<String>,

    /// Provider endpoint URL
    #[serde(default = "default_speech_endpoint")]
    pub endpoint: String,

    /// Transcription model
    #[serde(default = "default_speech_model")]
    pub model: String,

    /// Target language forced for every transcription
    #[serde(default = "default_speech_language")]
    pub language: String,

    /// Request timeout in seconds
    #[serde(default = "default_speech_timeout")]
    pub timeout_seconds: u64,
}

/// Document structuring provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuringConfig {
    /// Provider API key; absence disables structuring
    #[serde(default = "default_structuring_api_key")]
    pub api_key: Option<String>,

    /// Provider endpoint URL
    #[serde(default = "default_structuring_endpoint")]
    pub endpoint: String,

    /// Language model used for structuring
    #[serde(default = "default_structuring_model")]
    pub model: String,

    /// Maximum tokens requested per completion
    #[serde(default = "default_structuring_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_structuring_timeout")]
    pub timeout_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or text)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3001
}

fn default_staging_dir() -> PathBuf {
    std::env::temp_dir().join("voicescribe-staging")
}

const fn default_max_upload_bytes() -> u64 {
    25 * 1024 * 1024 // 25 MiB
}

fn default_allowed_extensions() -> Vec<String> {
    ["mp3", "wav", "webm", "mp4", "m4a", "ogg"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_allowed_mime_types() -> Vec<String> {
    [
        "audio/mpeg",
        "audio/mp3",
        "audio/wav",
        "audio/webm",
        "audio/mp4",
        "audio/m4a",
        "audio/ogg",
        "audio/x-m4a",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn default_speech_api_key() -> Option<String> {
    std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty())
}

fn default_speech_endpoint() -> String {
    "https://api.openai.com/v1/audio/transcriptions".to_string()
}

fn default_speech_model() -> String {
    "whisper-1".to_string()
}

fn default_speech_language() -> String {
    "ko".to_string()
}

const fn default_speech_timeout() -> u64 {
    120
}

fn default_structuring_api_key() -> Option<String> {
    std::env::var("ANTHROPIC_API_KEY")
        .ok()
        .filter(|k| !k.is_empty())
}

fn default_structuring_endpoint() -> String {
    "https://api.anthropic.com/v1/messages".to_string()
}

fn default_structuring_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

const fn default_structuring_max_tokens() -> u32 {
    4096
}

const fn default_structuring_timeout() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            staging_dir: default_staging_dir(),
            max_upload_bytes: default_max_upload_bytes(),
            allowed_extensions: default_allowed_extensions(),
            allowed_mime_types: default_allowed_mime_types(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            api_key: default_speech_api_key(),
            endpoint: default_speech_endpoint(),
            model: default_speech_model(),
            language: default_speech_language(),
            timeout_seconds: default_speech_timeout(),
        }
    }
}

impl Default for StructuringConfig {
    fn default() -> Self {
        Self {
            api_key: default_structuring_api_key(),
            endpoint: default_structuring_endpoint(),
            model: default_structuring_model(),
            max_tokens: default_structuring_max_tokens(),
            timeout_seconds: default_structuring_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from environment and files
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load() -> crate::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("VOICESCRIBE").separator("_"))
            .build()
            .map_err(|e| crate::Error::Configuration {
                message: e.to_string(),
            })?;

        config
            .try_deserialize()
            .map_err(|e| crate::Error::Configuration {
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::uninlined_format_args)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3001);

        assert_eq!(config.storage.max_upload_bytes, 25 * 1024 * 1024);
        assert_eq!(
            config.storage.allowed_extensions,
            vec!["mp3", "wav", "webm", "mp4", "m4a", "ogg"]
        );
        assert!(
            config
                .storage
                .allowed_mime_types
                .contains(&"audio/x-m4a".to_string())
        );

        assert_eq!(
            config.speech.endpoint,
            "https://api.openai.com/v1/audio/transcriptions"
        );
        assert_eq!(config.speech.model, "whisper-1");
        assert_eq!(config.speech.language, "ko");
        assert_eq!(config.speech.timeout_seconds, 120);

        assert_eq!(
            config.structuring.endpoint,
            "https://api.anthropic.com/v1/messages"
        );
        assert_eq!(config.structuring.model, "claude-sonnet-4-20250514");
        assert_eq!(config.structuring.max_tokens, 4096);
        assert_eq!(config.structuring.timeout_seconds, 60);

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "text");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();

        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized.server.host, config.server.host);
        assert_eq!(deserialized.server.port, config.server.port);
        assert_eq!(
            deserialized.storage.max_upload_bytes,
            config.storage.max_upload_bytes
        );
        assert_eq!(deserialized.speech.model, config.speech.model);
        assert_eq!(deserialized.structuring.model, config.structuring.model);
        assert_eq!(deserialized.logging.level, config.logging.level);
    }

    #[test]
    fn test_partial_config_deserialization() {
        let json_str = r#"{
            "server": {"port": 8080},
            "storage": {"max_upload_bytes": 1048576},
            "speech": {"language": "en"},
            "structuring": {},
            "logging": {}
        }"#;

        let config: Config = serde_json::from_str(json_str).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0"); // Uses default
        assert_eq!(config.storage.max_upload_bytes, 1_048_576);
        assert_eq!(config.storage.allowed_extensions.len(), 6); // Uses default
        assert_eq!(config.speech.language, "en");
        assert_eq!(config.speech.model, "whisper-1"); // Uses default
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();

        assert_eq!(config.server.port, 3001);
        assert_eq!(config.speech.language, "ko");
        assert_eq!(config.structuring.max_tokens, 4096);
    }

    #[test]
    fn test_default_value_functions() {
        assert_eq!(default_host(), "0.0.0.0");
        assert_eq!(default_port(), 3001);
        assert_eq!(default_max_upload_bytes(), 26_214_400);
        assert_eq!(default_allowed_extensions().len(), 6);
        assert_eq!(default_allowed_mime_types().len(), 8);
        assert_eq!(default_speech_model(), "whisper-1");
        assert_eq!(default_speech_language(), "ko");
        assert_eq!(default_structuring_max_tokens(), 4096);
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_log_format(), "text");
    }

    #[test]
    fn test_config_bounds_validation() {
        let config = Config::default();

        assert!(config.server.port > 0);
        assert!(config.storage.max_upload_bytes >= 1_000_000);
        assert!(!config.storage.allowed_extensions.is_empty());
        assert!(!config.storage.allowed_mime_types.is_empty());
        assert!(config.speech.timeout_seconds > 0);
        assert!(config.structuring.timeout_seconds > 0);
        assert!(config.structuring.max_tokens > 0);
    }

    // Note: environment variable override tests are omitted here because
    // std::env::set_var is unsafe in edition 2024. Integration tests cover
    // environment-driven configuration instead.
}
