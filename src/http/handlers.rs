// Endpoint handlers - validate, call the extractor, respond

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use tracing::info;

use super::errors::ApiError;
use super::request::{parse_request, MediaRequest};
use super::stream::Attachment;
use super::AppState;
use crate::downloader::archive::write_archive;
use crate::downloader::format_selector::{PLAYLIST_OUTPUT_TEMPLATE, SINGLE_OUTPUT_NAME};
use crate::downloader::{
    sanitize_filename, DownloadError, DownloadOptions, InfoOptions, MediaInfo, TempArtifact,
};

const VIDEO_FALLBACK_NAME: &str = "video";
const PLAYLIST_FALLBACK_NAME: &str = "playlist";

/// `POST /api/info`
pub async fn info(
    State(state): State<AppState>,
    payload: Result<Json<MediaRequest>, JsonRejection>,
) -> Result<Json<MediaInfo>, ApiError> {
    let request = parse_request(payload)?;
    info!(url = %request.url, mode = ?request.mode, "extracting info");

    let raw = state
        .extractor
        .extract_info(&request.url, &request.mode.info_options())
        .await?;

    Ok(Json(MediaInfo::from(raw)))
}

/// `POST /api/download` - one video as an mp4 attachment
pub async fn download(
    State(state): State<AppState>,
    payload: Result<Json<MediaRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let request = parse_request(payload)?;
    let url = request.url;

    info!(url = %url, "extracting info before download");
    let meta = state
        .extractor
        .extract_info(&url, &InfoOptions::single())
        .await?;
    let title = meta.title.as_deref().unwrap_or(VIDEO_FALLBACK_NAME);
    let name = sanitize_filename(title);

    let work = TempArtifact::dir(&state.temp_dir)?;
    let output = work.path().join(SINGLE_OUTPUT_NAME);

    info!(
        url = %url,
        output = %output.display(),
        extractor = state.extractor.name(),
        "downloading"
    );
    state
        .extractor
        .download(&url, &DownloadOptions::single(output.clone()))
        .await?;

    if !tokio::fs::try_exists(&output).await.unwrap_or(false) {
        return Err(DownloadError::MissingOutput(output).into());
    }

    info!(url = %url, file = %name, "streaming video");
    Attachment {
        path: output,
        guards: vec![work],
        name,
        extension: "mp4",
        content_type: "video/mp4",
    }
    .into_response()
    .await
}

/// `POST /api/download-playlist` - every item zipped into one attachment
pub async fn download_playlist(
    State(state): State<AppState>,
    payload: Result<Json<MediaRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let request = parse_request(payload)?;
    let url = request.url;

    let download_dir = TempArtifact::dir(&state.temp_dir)?;
    let template = download_dir.path().join(PLAYLIST_OUTPUT_TEMPLATE);

    info!(
        url = %url,
        dir = %download_dir.path().display(),
        extractor = state.extractor.name(),
        "downloading playlist"
    );
    let meta = state
        .extractor
        .download(&url, &DownloadOptions::playlist(template))
        .await?;

    let archive = TempArtifact::file(&state.temp_dir, ".zip");
    let source = download_dir.path().to_path_buf();
    let target = archive.path().to_path_buf();

    info!(url = %url, archive = %target.display(), "packaging playlist");
    let count = tokio::task::spawn_blocking(move || write_archive(&source, &target))
        .await
        .map_err(|e| ApiError::internal(format!("Packaging task failed: {}", e)))??;

    // The loose files are no longer needed once the archive exists
    drop(download_dir);

    let title = meta.title.as_deref().unwrap_or(PLAYLIST_FALLBACK_NAME);
    let name = sanitize_filename(title);

    info!(url = %url, files = count, file = %name, "streaming playlist archive");
    Attachment {
        path: archive.path().to_path_buf(),
        guards: vec![archive],
        name,
        extension: "zip",
        content_type: "application/zip",
    }
    .into_response()
    .await
}
