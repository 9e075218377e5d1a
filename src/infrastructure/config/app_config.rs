//! Application configuration.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";
const APP_NAME: &str = "galleria";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Photo orientation filter for search requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Taller than wide.
    #[default]
    Portrait,
    /// Wider than tall.
    Landscape,
    /// Roughly square.
    Squarish,
}

impl Orientation {
    /// The query parameter value the API expects.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
            Self::Squarish => "squarish",
        }
    }
}

/// Search endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Client credential sent with every request.
    #[serde(default)]
    pub access_key: String,

    /// Fixed search query term.
    #[serde(default = "default_query")]
    pub query: String,

    /// Photos per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Orientation filter.
    #[serde(default)]
    pub orientation: Orientation,

    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Total request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl SearchConfig {
    /// Sets the client credential.
    #[must_use]
    pub fn with_access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = access_key.into();
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_key: String::new(),
            query: default_query(),
            per_page: default_per_page(),
            orientation: Orientation::default(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Image cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageCacheConfig {
    /// Maximum number of cached images.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Maximum total decoded bytes held.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,

    /// Image download timeout in seconds.
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

impl Default for ImageCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            max_bytes: default_max_bytes(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Search endpoint configuration.
    #[serde(default)]
    pub search: SearchConfig,

    /// Image cache configuration.
    #[serde(default)]
    pub image_cache: ImageCacheConfig,
}

impl AppConfig {
    /// Loads configuration from `path_override` or the default location.
    ///
    /// A missing or malformed file yields the defaults.
    #[must_use]
    pub fn load_or_default(path_override: Option<&Path>) -> Self {
        let path = path_override
            .map(Path::to_path_buf)
            .or_else(Self::default_config_path);
        let Some(path) = path else {
            warn!("Failed to determine config directory, using defaults");
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!(error = %e, "Failed to read config file, using defaults");
                return Self::default();
            }
        };

        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Failed to parse config file, using defaults");
                Self::default()
            }
        }
    }

    /// Returns the default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn default_base_url() -> String {
    "https://api.unsplash.com".to_string()
}

fn default_query() -> String {
    "nature".to_string()
}

const fn default_per_page() -> u32 {
    30
}

const fn default_connect_timeout() -> u64 {
    30
}

const fn default_request_timeout() -> u64 {
    60
}

const fn default_max_entries() -> usize {
    100
}

const fn default_max_bytes() -> u64 {
    50 * 1024 * 1024
}

const fn default_fetch_timeout() -> u64 {
    30
}
