// Extractor configuration - opaque knobs passed through to yt-dlp

use std::fmt;
use std::str::FromStr;

/// How yt-dlp is invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractorMode {
    /// Native `yt-dlp` binary
    #[default]
    Cli,
    /// `python3 -m yt_dlp` (better at avoiding bot detection on some hosts)
    Python,
}

impl fmt::Display for ExtractorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cli => write!(f, "cli"),
            Self::Python => write!(f, "python"),
        }
    }
}

impl FromStr for ExtractorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cli" | "binary" => Ok(Self::Cli),
            "python" | "module" => Ok(Self::Python),
            other => Err(format!("unknown extractor mode '{}'", other)),
        }
    }
}

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
(KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Tries several YouTube player clients in one call
pub const DEFAULT_PLAYER_CLIENT: &str = "web,web_safari,ios";

/// Configuration for the yt-dlp collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    pub mode: ExtractorMode,
    /// Explicit yt-dlp binary; auto-detected when unset
    pub ytdlp_path: Option<String>,
    /// Interpreter for python mode
    pub python_cmd: String,
    /// `--socket-timeout` in seconds
    pub socket_timeout: u32,
    /// `--retries` and `--fragment-retries`
    pub retries: u32,
    /// Wall-clock limit for metadata calls
    pub info_timeout_secs: u64,
    /// Wall-clock limit for download calls
    pub download_timeout_secs: u64,
    /// YouTube player client list
    pub player_client: String,
    pub user_agent: String,
    pub accept_language: String,
    /// SOCKS5/HTTP proxy URL
    pub proxy: Option<String>,
    /// Path to cookies.txt file
    pub cookies_path: Option<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            mode: ExtractorMode::Cli,
            ytdlp_path: None,
            python_cmd: "python3".to_string(),
            socket_timeout: 30,
            retries: 10,
            info_timeout_secs: 120,
            download_timeout_secs: 3600,
            player_client: DEFAULT_PLAYER_CLIENT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            proxy: None,
            cookies_path: None,
        }
    }
}

impl ExtractorConfig {
    pub fn with_mode(mut self, mode: ExtractorMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_ytdlp_path(mut self, path: Option<String>) -> Self {
        self.ytdlp_path = path;
        self
    }

    pub fn with_python_cmd(mut self, cmd: impl Into<String>) -> Self {
        self.python_cmd = cmd.into();
        self
    }

    /// Wall-clock limits for metadata and download calls, in seconds
    pub fn with_timeouts(mut self, info_secs: u64, download_secs: u64) -> Self {
        self.info_timeout_secs = info_secs;
        self.download_timeout_secs = download_secs;
        self
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn with_cookies_path(mut self, path: Option<String>) -> Self {
        self.cookies_path = path;
        self
    }

    pub fn with_socket_timeout(mut self, seconds: u32) -> Self {
        self.socket_timeout = seconds;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_player_client(mut self, client: impl Into<String>) -> Self {
        self.player_client = client.into();
        self
    }
}
