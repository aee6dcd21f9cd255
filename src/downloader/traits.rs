// MediaExtractor trait - the seam to the external extraction engine

use std::path::PathBuf;

use async_trait::async_trait;

use super::errors::DownloadError;
use super::format_selector::{MAX_PLAYLIST_ITEMS, MERGE_OUTPUT_FORMAT, VIDEO_FORMAT};
use super::models::RawInfo;

/// Options for a metadata-only lookup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InfoOptions {
    /// Resolve playlist entries shallowly (title/url/id only)
    pub flat_playlist: bool,
}

impl InfoOptions {
    pub fn single() -> Self {
        Self {
            flat_playlist: false,
        }
    }

    pub fn playlist() -> Self {
        Self {
            flat_playlist: true,
        }
    }
}

/// Options for a download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOptions {
    /// yt-dlp output template (absolute)
    pub output_template: PathBuf,
    /// Format selection expression
    pub format: String,
    /// Container for merged streams
    pub merge_output_format: String,
    /// Download every playlist item instead of only the referenced video
    pub playlist: bool,
    /// Keep going when single items fail
    pub ignore_errors: bool,
    /// Upper bound on playlist items
    pub max_items: Option<usize>,
}

impl DownloadOptions {
    /// One video written to exactly `output_path`
    pub fn single(output_path: PathBuf) -> Self {
        Self {
            output_template: output_path,
            format: VIDEO_FORMAT.to_string(),
            merge_output_format: MERGE_OUTPUT_FORMAT.to_string(),
            playlist: false,
            ignore_errors: false,
            max_items: None,
        }
    }

    /// Every playlist item, named by `output_template`
    pub fn playlist(output_template: PathBuf) -> Self {
        Self {
            output_template,
            format: VIDEO_FORMAT.to_string(),
            merge_output_format: MERGE_OUTPUT_FORMAT.to_string(),
            playlist: true,
            ignore_errors: true,
            max_items: Some(MAX_PLAYLIST_ITEMS),
        }
    }
}

/// External extraction engine
#[async_trait]
pub trait MediaExtractor: Send + Sync {
    /// Name of the extractor (for logging)
    fn name(&self) -> &'static str;

    /// Resolve metadata without downloading anything
    async fn extract_info(&self, url: &str, options: &InfoOptions)
        -> Result<RawInfo, DownloadError>;

    /// Download media to `options.output_template` and report the metadata tree
    async fn download(&self, url: &str, options: &DownloadOptions)
        -> Result<RawInfo, DownloadError>;
}
