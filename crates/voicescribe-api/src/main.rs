//! Main entry point for the voicescribe API server

use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;
use voicescribe_api::build_router;
use voicescribe_core::{init_logging, Config, Error, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (for development convenience)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: .env file not loaded: {e}");
    }

    // Load configuration, then bring up logging with its settings
    let config = Config::load().unwrap_or_else(|err| {
        eprintln!("Failed to load config ({err}), using defaults");
        Config::default()
    });
    init_logging(&config.logging)?;

    info!("╔══════════════════════════════════════════════════════════╗");
    info!(
        "║        voicescribe dictation backend v{}              ║",
        env!("CARGO_PKG_VERSION")
    );
    info!("╚══════════════════════════════════════════════════════════╝");
    info!(
        "🎤 Speech-to-text: {}",
        if config.speech.api_key.is_some() {
            "enabled"
        } else {
            "disabled (no API key)"
        }
    );
    info!(
        "📝 Structuring:    {}",
        if config.structuring.api_key.is_some() {
            "enabled"
        } else {
            "disabled (no API key)"
        }
    );

    // Build the application router
    let app = build_router(config.clone())?
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    // Create server address
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| Error::Configuration {
            message: format!("invalid server address: {e}"),
        })?;

    let listener = TcpListener::bind(&addr).await.map_err(|e| Error::Other(
        format!("failed to bind to {addr}: {e}"),
    ))?;

    info!("🚀 Listening on http://{addr}");
    info!("💚 Health:   http://{addr}/health");
    info!("📡 Endpoints: POST /api/transcribe, POST /api/transcribe-audio");

    // Start the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::Other(format!("server error: {e}")))?;

    info!("👋 Server shutdown complete");
    Ok(())
}

/// Handle graceful shutdown signals
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received terminate signal, shutting down gracefully...");
        },
    }
}
