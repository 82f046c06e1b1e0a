//! voicescribe API server library

#![forbid(unsafe_code)]

pub mod handlers;
pub mod routes;
pub mod state;

pub use state::AppState;

use axum::Router;
use std::sync::Arc;
use voicescribe_core::{Config, Result};

/// Build the API router with the real provider adapters
///
/// # Errors
///
/// Returns an error if the application state cannot be created or
/// fails validation.
pub fn build_router(config: Config) -> Result<Router> {
    let state = Arc::new(AppState::new(config)?);
    state.validate()?;

    Ok(routes::build_router().with_state(state))
}

/// Build the API router from pre-built application state
///
/// Used by tests to wire in mock or redirected provider adapters.
///
/// # Errors
///
/// Returns an error if the application state fails validation.
pub fn build_router_with_state(state: Arc<AppState>) -> Result<Router> {
    state.validate()?;

    Ok(routes::build_router().with_state(state))
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_config(temp_dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.storage.staging_dir = temp_dir.path().join("staging");
        config.speech.api_key = None;
        config.structuring.api_key = None;
        config
    }

    #[test]
    fn test_build_router() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = create_test_config(&temp_dir);

        let router = build_router(config);
        assert!(router.is_ok());
    }

    #[test]
    fn test_build_router_creates_staging_dir() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = create_test_config(&temp_dir);
        let staging_dir = config.storage.staging_dir.clone();

        build_router(config).expect("Failed to build router");
        assert!(staging_dir.exists());
    }
}
