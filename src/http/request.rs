// Request bodies and validation

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::Deserialize;

use super::errors::ApiError;
use crate::downloader::InfoOptions;

pub const MISSING_URL: &str = "No URL provided";

/// Body shared by all three endpoints
#[derive(Debug, Default, Deserialize)]
pub struct MediaRequest {
    #[serde(default)]
    pub url: Option<String>,
    /// `"playlist"` selects playlist mode; anything else is single
    #[serde(default, rename = "type")]
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    Single,
    Playlist,
}

impl RequestMode {
    pub fn info_options(self) -> InfoOptions {
        match self {
            Self::Single => InfoOptions::single(),
            Self::Playlist => InfoOptions::playlist(),
        }
    }
}

/// A request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRequest {
    pub url: String,
    pub mode: RequestMode,
}

impl MediaRequest {
    pub fn validate(self) -> Result<ValidRequest, ApiError> {
        let url = self
            .url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ApiError::bad_request(MISSING_URL))?;

        let mode = match self.mode.as_deref() {
            Some("playlist") => RequestMode::Playlist,
            _ => RequestMode::Single,
        };

        Ok(ValidRequest { url, mode })
    }
}

/// Unwrap the JSON extractor result and validate it.
///
/// Malformed or missing bodies are client errors, same as a missing url.
pub fn parse_request(
    payload: Result<Json<MediaRequest>, JsonRejection>,
) -> Result<ValidRequest, ApiError> {
    match payload {
        Ok(Json(request)) => request.validate(),
        Err(rejection) => Err(ApiError::bad_request(format!(
            "Invalid request body: {}",
            rejection.body_text()
        ))),
    }
}
