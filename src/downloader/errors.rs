// Error types for the extraction pipeline

use std::path::PathBuf;

use thiserror::Error;

use super::diagnostics::{diagnose_error, FailureKind};

#[derive(Debug, Error)]
pub enum DownloadError {
    /// yt-dlp (or the python interpreter) could not be started
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// The extractor process ran past its wall-clock limit
    #[error("yt-dlp timed out after {0}s")]
    Timeout(u64),

    /// yt-dlp exited with an error; carries its own message
    #[error("{0}")]
    Extraction(String),

    /// Failed to parse yt-dlp JSON output
    #[error("Failed to parse yt-dlp output: {0}")]
    Parse(String),

    /// Filesystem or process plumbing failed
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Zip packaging failed
    #[error("Failed to build archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// The collaborator reported success but left nothing on disk
    #[error("Download finished but no output was produced at {0}")]
    MissingOutput(PathBuf),

    /// Playlist download produced no files at all
    #[error("No videos could be downloaded from this playlist")]
    EmptyPlaylist,
}

impl DownloadError {
    pub fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    /// Classify failures reported by the extractor.
    ///
    /// Only the extractor's own text is matched; errors raised by this
    /// service carry temp paths and are never classified.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Extraction(message) => diagnose_error(message),
            Self::Timeout(_) => Some(FailureKind::Timeout),
            _ => None,
        }
    }

    /// Message shown to API clients.
    ///
    /// Known extractor failures are rewritten to a fixed explanation,
    /// anything else is passed through as-is.
    pub fn user_message(&self) -> String {
        match self.failure_kind() {
            Some(kind) => kind.user_message().to_string(),
            None => self.to_string(),
        }
    }
}
