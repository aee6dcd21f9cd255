// youtube-downloader-server - HTTP front end for yt-dlp

pub mod config;
pub mod downloader;
pub mod http;
pub mod logging;

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use config::{ConfigError, ServerConfig};
use downloader::{MediaExtractor, YtDlpExtractor};
use http::AppState;

/// Anything that stops the server from starting or keeps it from running
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to install logger: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Serve the API until Ctrl+C
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let extractor = YtDlpExtractor::new(config.extractor.clone());
    info!(
        extractor = extractor.name(),
        program = extractor.program(),
        temp_dir = %config.temp_dir.display(),
        "extractor configured"
    );

    let state = AppState::new(Arc::new(extractor), config.temp_dir.clone());
    let app = http::router(state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!(%addr, debug = config.debug, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to install Ctrl+C handler");
    }
    info!("shutting down");
}
