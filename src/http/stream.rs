// File streaming - response bodies that own their temporary artifacts
//
// The body holds the guards, so the files are removed once the body is
// dropped: after the last chunk, or when the client disconnects.

use std::io;
use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::{Body, Bytes};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::Response;
use futures_core::Stream;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::debug;

use super::errors::ApiError;
use crate::downloader::format_selector::STREAM_CHUNK_SIZE;
use crate::downloader::{DownloadError, TempArtifact};

/// Chunked reader over a file that keeps `guards` alive until it is dropped
pub struct ArtifactStream {
    inner: ReaderStream<File>,
    _guards: Vec<TempArtifact>,
}

impl Stream for ArtifactStream {
    type Item = io::Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// A file on disk to be sent as an attachment
pub struct Attachment {
    pub path: PathBuf,
    /// Artifacts to keep until the transfer ends; `path` lives inside one of them
    pub guards: Vec<TempArtifact>,
    /// Sanitized base name, without extension
    pub name: String,
    pub extension: &'static str,
    pub content_type: &'static str,
}

impl Attachment {
    /// Open the file and build a streaming `200` response
    pub async fn into_response(self) -> Result<Response, ApiError> {
        let path = self.path;
        let file = File::open(&path)
            .await
            .map_err(|e| DownloadError::io("opening output for streaming", e))?;
        let length = file
            .metadata()
            .await
            .map_err(|e| DownloadError::io("reading output metadata", e))?
            .len();

        let disposition = content_disposition(&self.name, self.extension);
        debug!(path = %path.display(), length, %disposition, "streaming attachment");

        let stream = ArtifactStream {
            inner: ReaderStream::with_capacity(file, STREAM_CHUNK_SIZE),
            _guards: self.guards,
        };

        let disposition = HeaderValue::from_str(&disposition)
            .map_err(|_| ApiError::internal("Could not build download header"))?;

        Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, HeaderValue::from_static(self.content_type))
            .header(CONTENT_LENGTH, length)
            .header(CONTENT_DISPOSITION, disposition)
            .body(Body::from_stream(stream))
            .map_err(|e| ApiError::internal(format!("Could not build response: {}", e)))
    }
}

/// `attachment; filename="<name>.<ext>"`; `name` must already be sanitized
pub fn content_disposition(name: &str, extension: &str) -> String {
    format!("attachment; filename=\"{}.{}\"", name, extension)
}
