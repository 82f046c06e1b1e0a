//! Application state management

use std::sync::Arc;
use voicescribe_core::{Config, Error, Result};
use voicescribe_providers::{
    ClaudeStructuring, DocumentStructurer, SpeechToText, TranscriptionPipeline,
    WhisperSpeechToText,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Transcription pipeline composing the provider adapters
    pub pipeline: TranscriptionPipeline,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("pipeline", &self.pipeline)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create application state with the real provider adapters
    ///
    /// # Errors
    ///
    /// Returns an error if the staging directory cannot be created.
    pub fn new(config: Config) -> Result<Self> {
        let speech = Arc::new(WhisperSpeechToText::new(config.speech.clone()));
        let structurer = Arc::new(ClaudeStructuring::new(config.structuring.clone()));
        Self::with_adapters(config, speech, structurer)
    }

    /// Create application state with custom provider adapters
    ///
    /// # Errors
    ///
    /// Returns an error if the staging directory cannot be created.
    pub fn with_adapters(
        config: Config,
        speech: Arc<dyn SpeechToText>,
        structurer: Arc<dyn DocumentStructurer>,
    ) -> Result<Self> {
        // Ensure the staging directory exists before accepting uploads
        std::fs::create_dir_all(&config.storage.staging_dir)?;

        Ok(Self {
            config,
            pipeline: TranscriptionPipeline::new(speech, structurer),
        })
    }

    /// Check if the application is properly configured
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn validate(&self) -> Result<()> {
        let staging_dir = &self.config.storage.staging_dir;
        if !staging_dir.exists() {
            return Err(Error::Configuration {
                message: format!("staging directory does not exist: {}", staging_dir.display()),
            });
        }

        // Try to create a test file to verify write permissions
        let test_file = staging_dir.join(".write_test");
        std::fs::write(&test_file, "test")?;
        std::fs::remove_file(&test_file)?;

        Ok(())
    }
}
