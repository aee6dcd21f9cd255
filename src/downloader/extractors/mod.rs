// Extractor module - the yt-dlp collaborator
//
// Two invocation modes share one implementation:
// - CLI mode: native `yt-dlp` binary (default)
// - Python mode: `python3 -m yt_dlp`

mod cli;
mod config;

pub use cli::YtDlpExtractor;
pub use config::{ExtractorConfig, ExtractorMode};
