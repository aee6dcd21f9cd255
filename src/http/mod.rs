// HTTP surface - router, shared state and the three POST endpoints

pub mod errors;
pub mod handlers;
pub mod request;
pub mod stream;

use std::path::PathBuf;
use std::sync::Arc;

use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::Method;
use axum::routing::post;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::downloader::MediaExtractor;

pub use errors::ApiError;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<dyn MediaExtractor>,
    /// Root under which per-request artifacts are created
    pub temp_dir: PathBuf,
}

impl AppState {
    pub fn new(extractor: Arc<dyn MediaExtractor>, temp_dir: PathBuf) -> Self {
        Self {
            extractor,
            temp_dir,
        }
    }
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .expose_headers([CONTENT_DISPOSITION])
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/download", post(handlers::download))
        .route("/api/info", post(handlers::info))
        .route("/api/download-playlist", post(handlers::download_playlist))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
