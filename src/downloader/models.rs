// Data models shared between the extractor and the HTTP layer

use serde::{Deserialize, Serialize};

use super::format_selector::PLAYLIST_PREVIEW_LIMIT;

/// The subset of yt-dlp's info dict the service reads.
///
/// Everything is optional: yt-dlp omits fields freely depending on the
/// extractor and on whether the playlist was flattened.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawInfo {
    #[serde(rename = "_type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub webpage_url: Option<String>,
    /// `null` items are entries that failed under `--ignore-errors`
    #[serde(default)]
    pub entries: Option<Vec<Option<RawInfo>>>,
}

impl RawInfo {
    pub fn is_playlist(&self) -> bool {
        self.kind.as_deref() == Some("playlist")
    }
}

/// Preview row for one playlist item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub title: Option<String>,
    pub url: Option<String>,
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleInfo {
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<f64>,
    pub uploader: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistInfo {
    pub title: Option<String>,
    pub uploader: Option<String>,
    pub video_count: usize,
    pub videos: Vec<PlaylistEntry>,
}

/// Metadata returned by `/api/info`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MediaInfo {
    Single(SingleInfo),
    Playlist(PlaylistInfo),
}

impl From<RawInfo> for MediaInfo {
    fn from(raw: RawInfo) -> Self {
        if raw.is_playlist() {
            let entries = raw.entries.unwrap_or_default();
            let videos = entries
                .iter()
                .take(PLAYLIST_PREVIEW_LIMIT)
                .flatten()
                .map(|entry| PlaylistEntry {
                    title: entry.title.clone(),
                    url: entry.url.clone().or_else(|| entry.webpage_url.clone()),
                    id: entry.id.clone(),
                })
                .collect();

            Self::Playlist(PlaylistInfo {
                title: raw.title,
                uploader: raw.uploader,
                video_count: entries.len(),
                videos,
            })
        } else {
            Self::Single(SingleInfo {
                title: raw.title,
                thumbnail: raw.thumbnail,
                duration: raw.duration.filter(|d| d.is_finite() && *d >= 0.0),
                uploader: raw.uploader,
            })
        }
    }
}
