// Format policy - what gets fetched and how much of it
//
// Nothing above 1080p is ever requested.

/// Prefer an exact 1080p mp4 + m4a pair, then anything up to 1080p,
/// then the best progressive stream up to 1080p.
pub const VIDEO_FORMAT: &str = "bestvideo[height=1080][ext=mp4]+bestaudio[ext=m4a]/\
bestvideo[height<=1080][ext=mp4]+bestaudio[ext=m4a]/\
best[height<=1080]";

/// Container the merged streams are written to
pub const MERGE_OUTPUT_FORMAT: &str = "mp4";

/// Playlist downloads stop after this many items
pub const MAX_PLAYLIST_ITEMS: usize = 50;

/// `/api/info` never returns more playlist entries than this
pub const PLAYLIST_PREVIEW_LIMIT: usize = 10;

/// Response bodies are read from disk in chunks of this size
pub const STREAM_CHUNK_SIZE: usize = 8192;

/// Output template for playlist items, relative to the download directory
pub const PLAYLIST_OUTPUT_TEMPLATE: &str = "%(playlist_index)s - %(title)s.%(ext)s";

/// File name of the single-download output inside its work directory
pub const SINGLE_OUTPUT_NAME: &str = "media.mp4";
