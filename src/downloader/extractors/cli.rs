// yt-dlp extractor - drives yt-dlp as a subprocess
//
// Both the native binary and `python3 -m yt_dlp` take the same arguments,
// so the mode only changes the program and its leading args.

use std::path::Path;
use std::process::Command as StdCommand;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::config::{ExtractorConfig, ExtractorMode};
use crate::downloader::errors::DownloadError;
use crate::downloader::models::RawInfo;
use crate::downloader::traits::{DownloadOptions, InfoOptions, MediaExtractor};
use crate::downloader::utils::{error_summary, run_output_with_timeout};

/// Extractor backed by a local yt-dlp installation
pub struct YtDlpExtractor {
    program: String,
    prefix_args: Vec<String>,
    config: ExtractorConfig,
}

impl YtDlpExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        let (program, prefix_args) = match config.mode {
            ExtractorMode::Cli => (
                config.ytdlp_path.clone().unwrap_or_else(find_ytdlp),
                Vec::new(),
            ),
            ExtractorMode::Python => (
                config.python_cmd.clone(),
                vec!["-m".to_string(), "yt_dlp".to_string()],
            ),
        };

        Self {
            program,
            prefix_args,
            config,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments shared by every invocation
    fn common_args(&self) -> Vec<String> {
        let config = &self.config;
        let mut args = self.prefix_args.clone();
        args.extend([
            "-J".to_string(),
            "--no-warnings".to_string(),
            "--no-progress".to_string(),
            "--socket-timeout".to_string(),
            config.socket_timeout.to_string(),
            "--retries".to_string(),
            config.retries.to_string(),
            "--user-agent".to_string(),
            config.user_agent.clone(),
            "--add-header".to_string(),
            format!("Accept-Language:{}", config.accept_language),
            "--extractor-args".to_string(),
            format!("youtube:player_client={}", config.player_client),
        ]);

        if let Some(path) = &config.cookies_path {
            args.push("--cookies".to_string());
            args.push(path.clone());
        }

        if let Some(proxy) = &config.proxy {
            args.push("--proxy".to_string());
            args.push(proxy.clone());
        }

        args
    }

    pub(crate) fn info_args(&self, url: &str, options: &InfoOptions) -> Vec<String> {
        let mut args = self.common_args();
        if options.flat_playlist {
            args.push("--flat-playlist".to_string());
        } else {
            args.push("--no-playlist".to_string());
        }
        push_url(&mut args, url);
        args
    }

    pub(crate) fn download_args(&self, url: &str, options: &DownloadOptions) -> Vec<String> {
        let mut args = self.common_args();
        args.extend([
            "--no-simulate".to_string(),
            "--force-overwrites".to_string(),
            "--fragment-retries".to_string(),
            self.config.retries.to_string(),
            "-f".to_string(),
            options.format.clone(),
            "--merge-output-format".to_string(),
            options.merge_output_format.clone(),
            "-o".to_string(),
            options.output_template.to_string_lossy().into_owned(),
        ]);

        if options.playlist {
            args.push("--yes-playlist".to_string());
            if let Some(max) = options.max_items {
                args.push("--playlist-items".to_string());
                args.push(format!("1:{}", max));
            }
        } else {
            args.push("--no-playlist".to_string());
        }

        if options.ignore_errors {
            args.push("--ignore-errors".to_string());
        }

        push_url(&mut args, url);
        args
    }

    async fn run(
        &self,
        args: Vec<String>,
        timeout_secs: u64,
        tolerate_failure: bool,
    ) -> Result<RawInfo, DownloadError> {
        debug!(program = %self.program, args = %args.join(" "), "running yt-dlp");

        let output = run_output_with_timeout(&self.program, &args, timeout_secs).await?;

        if output.status.success() {
            return parse_json(&output.stdout);
        }

        let summary = error_summary(&output.stderr);
        if tolerate_failure {
            // --ignore-errors still exits non-zero when some items failed
            if let Ok(info) = parse_json(&output.stdout) {
                warn!(error = %summary, "yt-dlp reported item failures; continuing");
                return Ok(info);
            }
        }

        Err(DownloadError::Extraction(summary))
    }
}

fn push_url(args: &mut Vec<String>, url: &str) {
    // Everything after `--` is positional, so a URL can never become an option
    args.push("--".to_string());
    args.push(url.to_string());
}

fn parse_json(stdout: &[u8]) -> Result<RawInfo, DownloadError> {
    // -J prints a single JSON document on the last non-empty line
    let text = String::from_utf8_lossy(stdout);
    let json_line = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .next_back()
        .ok_or_else(|| DownloadError::Parse("empty output".to_string()))?;

    serde_json::from_str(json_line).map_err(|e| DownloadError::Parse(e.to_string()))
}

/// Find yt-dlp binary
fn find_ytdlp() -> String {
    let common_paths = [
        "/opt/homebrew/bin/yt-dlp", // Homebrew on Apple Silicon
        "/usr/local/bin/yt-dlp",    // Homebrew on Intel Mac / pip --user
        "/usr/bin/yt-dlp",          // System installation
    ];

    for path in common_paths {
        if Path::new(path).exists() {
            return path.to_string();
        }
    }

    if let Ok(output) = StdCommand::new("which").arg("yt-dlp").output() {
        if output.status.success() {
            if let Ok(path) = String::from_utf8(output.stdout) {
                let trimmed = path.trim();
                if !trimmed.is_empty() {
                    return trimmed.to_string();
                }
            }
        }
    }

    // Last resort: hope it's in PATH
    "yt-dlp".to_string()
}

#[async_trait]
impl MediaExtractor for YtDlpExtractor {
    fn name(&self) -> &'static str {
        match self.config.mode {
            ExtractorMode::Cli => "cli-yt-dlp",
            ExtractorMode::Python => "python-yt-dlp",
        }
    }

    async fn extract_info(
        &self,
        url: &str,
        options: &InfoOptions,
    ) -> Result<RawInfo, DownloadError> {
        let args = self.info_args(url, options);
        self.run(args, self.config.info_timeout_secs, false).await
    }

    async fn download(
        &self,
        url: &str,
        options: &DownloadOptions,
    ) -> Result<RawInfo, DownloadError> {
        let args = self.download_args(url, options);
        self.run(args, self.config.download_timeout_secs, options.ignore_errors)
            .await
    }
}
