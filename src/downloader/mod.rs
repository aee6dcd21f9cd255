// Downloader module - everything between an HTTP request and yt-dlp

pub mod archive;
pub mod diagnostics;
pub mod errors;
pub mod extractors;
pub mod format_selector;
pub mod models;
pub mod sanitize;
pub mod temp;
pub mod traits;
pub mod utils;

pub use diagnostics::{diagnose_error, FailureKind};
pub use errors::DownloadError;
pub use extractors::{ExtractorConfig, ExtractorMode, YtDlpExtractor};
pub use models::{MediaInfo, PlaylistEntry, PlaylistInfo, RawInfo, SingleInfo};
pub use sanitize::sanitize_filename;
pub use temp::TempArtifact;
pub use traits::{DownloadOptions, InfoOptions, MediaExtractor};
