// Zip packaging for playlist downloads

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::errors::DownloadError;

/// yt-dlp leftovers from interrupted or failed items
const PARTIAL_SUFFIXES: &[&str] = &[".part", ".ytdl"];

fn is_partial(path: &Path) -> bool {
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    PARTIAL_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Regular files under `dir`, sorted by path, partial downloads excluded
fn collect_files(dir: &Path) -> Result<Vec<PathBuf>, DownloadError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry =
            entry.map_err(|e| DownloadError::io("walking download directory", io::Error::from(e)))?;
        if entry.file_type().is_file() && !is_partial(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Write every file under `source_dir` into a flat zip at `archive_path`.
///
/// Entries are named by basename only. Returns the number of files packaged;
/// an archive is only written when there is at least one.
pub fn write_archive(source_dir: &Path, archive_path: &Path) -> Result<usize, DownloadError> {
    let files = collect_files(source_dir)?;
    if files.is_empty() {
        return Err(DownloadError::EmptyPlaylist);
    }

    let out = File::create(archive_path).map_err(|e| DownloadError::io("creating archive", e))?;
    let mut zip = ZipWriter::new(BufWriter::new(out));
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .large_file(true);

    for path in &files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!(entry = %name, "adding file to archive");

        zip.start_file(name, options)?;
        let mut input =
            File::open(path).map_err(|e| DownloadError::io("reading downloaded file", e))?;
        io::copy(&mut input, &mut zip).map_err(|e| DownloadError::io("writing archive", e))?;
    }

    let mut writer = zip.finish()?;
    io::Write::flush(&mut writer).map_err(|e| DownloadError::io("flushing archive", e))?;

    Ok(files.len())
}
