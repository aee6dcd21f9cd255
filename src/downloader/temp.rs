// Temporary artifacts - request-scoped files and directories
//
// Every artifact is uniquely named and removed when its guard drops, on
// success and error paths alike. Removal failures are logged, never raised.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use super::errors::DownloadError;

/// Prefix for every artifact this service creates in the temp root
pub const ARTIFACT_PREFIX: &str = "ytdl-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArtifactKind {
    File,
    Dir,
}

/// Owns a temporary path for the lifetime of one request
#[derive(Debug)]
pub struct TempArtifact {
    path: PathBuf,
    kind: ArtifactKind,
}

impl TempArtifact {
    /// Reserve a unique file path under `root`; the file itself is created
    /// by whoever writes it.
    pub fn file(root: &Path, suffix: &str) -> Self {
        Self {
            path: root.join(unique_name(suffix)),
            kind: ArtifactKind::File,
        }
    }

    /// Create a fresh, uniquely named directory under `root`
    pub fn dir(root: &Path) -> Result<Self, DownloadError> {
        let path = root.join(unique_name(""));
        fs::create_dir_all(&path)
            .map_err(|e| DownloadError::io("creating temporary directory", e))?;
        debug!(path = %path.display(), "created temporary directory");
        Ok(Self {
            path,
            kind: ArtifactKind::Dir,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn remove(&self) -> std::io::Result<()> {
        match self.kind {
            ArtifactKind::File => fs::remove_file(&self.path),
            ArtifactKind::Dir => fs::remove_dir_all(&self.path),
        }
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        match self.remove() {
            Ok(()) => debug!(path = %self.path.display(), "removed temporary artifact"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "failed to remove temporary artifact"
            ),
        }
    }
}

fn unique_name(suffix: &str) -> String {
    format!("{}{}{}", ARTIFACT_PREFIX, Uuid::new_v4().simple(), suffix)
}
