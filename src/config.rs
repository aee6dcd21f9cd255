//! Process configuration read from the environment.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::downloader::{ExtractorConfig, ExtractorMode};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_HOST: &str = "127.0.0.1";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: '{value}' ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Server settings plus the yt-dlp knobs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Verbose logging; on unless turned off
    pub debug: bool,
    /// Root for per-request temporary artifacts
    pub temp_dir: PathBuf,
    pub extractor: ExtractorConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            debug: true,
            temp_dir: env::temp_dir(),
            extractor: ExtractorConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let host = parse_or(get("HOST"), "HOST", defaults.host)?;
        let port = parse_or(get("PORT"), "PORT", defaults.port)?;
        let debug = match get("DEBUG") {
            Some(value) => parse_bool("DEBUG", &value)?,
            None => defaults.debug,
        };
        let temp_dir = get("TEMP_DIR").map(PathBuf::from).unwrap_or(defaults.temp_dir);

        let mode = match get("YTDLP_MODE") {
            Some(value) => {
                let parsed = ExtractorMode::from_str(&value);
                parsed.map_err(|reason| ConfigError::Invalid {
                    name: "YTDLP_MODE",
                    value,
                    reason,
                })?
            }
            None => defaults.extractor.mode,
        };

        let extractor_defaults = defaults.extractor;
        let socket_timeout = parse_or(
            get("YTDLP_SOCKET_TIMEOUT"),
            "YTDLP_SOCKET_TIMEOUT",
            extractor_defaults.socket_timeout,
        )?;
        let retries = parse_or(get("YTDLP_RETRIES"), "YTDLP_RETRIES", extractor_defaults.retries)?;
        let info_timeout = parse_or(
            get("YTDLP_INFO_TIMEOUT"),
            "YTDLP_INFO_TIMEOUT",
            extractor_defaults.info_timeout_secs,
        )?;
        let download_timeout = parse_or(
            get("YTDLP_DOWNLOAD_TIMEOUT"),
            "YTDLP_DOWNLOAD_TIMEOUT",
            extractor_defaults.download_timeout_secs,
        )?;

        let mut extractor = extractor_defaults
            .with_mode(mode)
            .with_ytdlp_path(get("YTDLP_PATH"))
            .with_socket_timeout(socket_timeout)
            .with_retries(retries)
            .with_timeouts(info_timeout, download_timeout)
            .with_proxy(get("YTDLP_PROXY"))
            .with_cookies_path(get("YTDLP_COOKIES"));
        if let Some(cmd) = get("YTDLP_PYTHON") {
            extractor = extractor.with_python_cmd(cmd);
        }
        if let Some(client) = get("YTDLP_PLAYER_CLIENT") {
            extractor = extractor.with_player_client(client);
        }

        Ok(Self {
            host,
            port,
            debug,
            temp_dir,
            extractor,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T>(value: Option<String>, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => {
            let parsed = raw.trim().parse::<T>();
            parsed.map_err(|e| ConfigError::Invalid {
                name,
                reason: e.to_string(),
                value: raw,
            })
        }
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}
