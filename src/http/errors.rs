// API error wrapper - every failure becomes `{"error": "..."}`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

use crate::downloader::DownloadError;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<DownloadError> for ApiError {
    fn from(err: DownloadError) -> Self {
        let kind = err
            .failure_kind()
            .map(|k| k.description())
            .unwrap_or("unclassified");
        error!(error = %err, kind, "request failed");
        Self::internal(err.user_message())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_client_error() {
            warn!(status = %self.status, message = %self.message, "rejecting request");
        }
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downloader::FailureKind;

    #[test]
    fn test_download_errors_map_to_500_with_user_message() {
        let err = ApiError::from(DownloadError::Extraction(
            "ERROR: HTTP Error 429: Too Many Requests".to_string(),
        ));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, FailureKind::RateLimited.user_message());
    }

    #[test]
    fn test_bad_request_keeps_message() {
        let err = ApiError::bad_request("No URL provided");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "No URL provided");
    }
}
