//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Environment variable holding the platform cookie.
pub const COOKIE_ENV: &str = "XIAOHONGSHU_COOKIE";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and fan-out behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Note cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Platform credentials
    #[serde(default)]
    pub xiaohongshu: XiaohongshuConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Apply overrides from the process environment.
    ///
    /// A non-empty `XIAOHONGSHU_COOKIE` replaces the configured cookie.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(cookie) = std::env::var(COOKIE_ENV) {
            if !cookie.trim().is_empty() {
                self.xiaohongshu.cookie = Some(cookie);
            }
        }
        self
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::config("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::config("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::config("crawler.max_concurrent must be > 0"));
        }
        if self.cache.max_entries == 0 {
            return Err(AppError::config("cache.max_entries must be > 0"));
        }
        Ok(())
    }
}

/// HTTP client and fan-out settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum in-flight note detail fetches per request
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// In-memory cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Seconds an entry stays valid
    #[serde(default = "defaults::ttl")]
    pub ttl_secs: u64,

    /// Entry cap before eviction kicks in
    #[serde(default = "defaults::max_entries")]
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: defaults::ttl(),
            max_entries: defaults::max_entries(),
        }
    }
}

/// Platform credential settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct XiaohongshuConfig {
    /// Raw `Cookie` header value copied from a logged-in browser session
    #[serde(default)]
    pub cookie: Option<String>,
}

impl XiaohongshuConfig {
    /// The configured cookie, ignoring blank values.
    pub fn cookie(&self) -> Option<&str> {
        self.cookie
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        5
    }

    // Cache defaults
    pub fn ttl() -> u64 {
        3600
    }
    pub fn max_entries() -> usize {
        10_000
    }

    pub fn log_level() -> String {
        "info".into()
    }
}
