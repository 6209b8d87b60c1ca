//! Configuration management for Storefront Trends
//!
//! Settings come from a TOML file with `[client]`, `[scan]`, `[cache]` and
//! `[logging]` sections. Every section and field is optional; anything left
//! out keeps its default. Durations are written in humantime form
//! (`"10s"`, `"100ms"`, `"1h"`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::cache::CacheConfig;
use crate::app::client::ClientConfig;
use crate::app::scheduler::SchedulerConfig;
use crate::constants::{cache, env, feed, http, limits, logging, scan};
use crate::errors::{ConfigError, ConfigResult};

/// Project-local config file name
pub const LOCAL_CONFIG_FILE: &str = "storefront-trends.toml";

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Feed client settings
    pub client: ClientConfigToml,
    /// Batch scheduling settings
    pub scan: ScanConfigToml,
    /// Chart cache settings
    pub cache: CacheConfigToml,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// TOML-friendly client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfigToml {
    /// Feed host
    pub base_url: String,
    /// Entries requested per chart
    pub chart_depth: u32,
    /// Per-request timeout
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Connect timeout
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    /// Rate limit (requests per second)
    pub rate_limit_rps: u32,
    /// Retries on 429/503/transport errors
    pub max_retries: u32,
    /// Base delay for exponential backoff
    #[serde(with = "humantime_serde")]
    pub retry_base_delay: Duration,
}

impl Default for ClientConfigToml {
    fn default() -> Self {
        Self {
            base_url: feed::BASE_URL.to_string(),
            chart_depth: feed::DEFAULT_CHART_DEPTH,
            request_timeout: http::DEFAULT_TIMEOUT,
            connect_timeout: http::CONNECT_TIMEOUT,
            rate_limit_rps: limits::DEFAULT_RATE_LIMIT_RPS,
            max_retries: limits::MAX_RETRIES,
            retry_base_delay: Duration::from_millis(limits::RETRY_BASE_DELAY_MS),
        }
    }
}

/// TOML-friendly scan scheduling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfigToml {
    /// Fetches in flight at once
    pub batch_size: usize,
    /// Pause between batches
    #[serde(with = "humantime_serde")]
    pub batch_delay: Duration,
}

impl Default for ScanConfigToml {
    fn default() -> Self {
        Self {
            batch_size: scan::DEFAULT_BATCH_SIZE,
            batch_delay: scan::DEFAULT_BATCH_DELAY,
        }
    }
}

/// TOML-friendly cache configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfigToml {
    /// How long a fetched chart stays fresh
    #[serde(with = "humantime_serde")]
    pub ttl: Duration,
    /// How often expired charts are swept
    #[serde(with = "humantime_serde")]
    pub sweep_interval: Duration,
    /// Run the background sweeper
    pub sweep_enabled: bool,
}

impl Default for CacheConfigToml {
    fn default() -> Self {
        Self {
            ttl: cache::CHART_TTL,
            sweep_interval: cache::SWEEP_INTERVAL,
            sweep_enabled: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level for the application
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Runtime configuration derived from [`AppConfig`]
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub client: ClientConfig,
    pub scheduler: SchedulerConfig,
    pub cache: CacheConfig,
}

impl AppConfig {
    /// Load configuration
    ///
    /// An explicit path must exist. Otherwise the first file found in the
    /// standard locations is used, falling back to defaults. The feed URL can
    /// be overridden through the environment.
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let config_path = match config_file_override {
            Some(path) if path.exists() => Some(path),
            Some(path) => return Err(ConfigError::NotFound { path }),
            None => Self::find_config_file(),
        };

        let mut config = match config_path {
            Some(path) => Self::load_from_file(&path).await?,
            None => {
                debug!("No config file found in standard locations, using defaults");
                Self::default()
            }
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(env::FEED_BASE_URL) {
            let url = url.trim();
            if !url.is_empty() {
                debug!("Feed URL overridden from {}: {}", env::FEED_BASE_URL, url);
                self.client.base_url = url.to_string();
            }
        }
    }

    /// Check every section, collecting one problem per section
    pub fn validate(&self) -> ConfigResult<()> {
        if self.logging.level.parse::<tracing::Level>().is_err() {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                value: self.logging.level.clone(),
                reason: "Expected one of error, warn, info, debug, trace".to_string(),
            });
        }

        let runtime = self.to_runtime_config();
        let errors: Vec<String> = [
            ("client", runtime.client.validate()),
            ("scan", runtime.scheduler.validate()),
            ("cache", runtime.cache.validate()),
        ]
        .into_iter()
        .filter_map(|(section, result)| result.err().map(|e| format!("[{}] {}", section, e)))
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::ValidationFailed { errors })
        }
    }

    /// Convert TOML-friendly configuration to runtime configuration
    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            client: self.client.to_runtime_config(),
            scheduler: self.scan.to_runtime_config(),
            cache: self.cache.to_runtime_config(),
        }
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(".").join(LOCAL_CONFIG_FILE)];
        if let Some(path) = Self::default_config_path() {
            search_paths.push(path);
        }

        search_paths.into_iter().find(|path| {
            let found = path.exists();
            if found {
                debug!("Found config file: {}", path.display());
            }
            found
        })
    }

    /// Default config file path for the current user
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("storefront-trends").join("config.toml"))
    }

    /// Load configuration from a TOML file
    async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.to_path_buf(),
            })?;

        let config = Self::from_toml(&content)?;
        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }
}

impl ClientConfigToml {
    /// Convert to runtime ClientConfig
    pub fn to_runtime_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            chart_depth: self.chart_depth,
            request_timeout: self.request_timeout,
            connect_timeout: self.connect_timeout,
            rate_limit_rps: self.rate_limit_rps,
            max_retries: self.max_retries,
            retry_base_delay: self.retry_base_delay,
            ..ClientConfig::default()
        }
    }
}

impl ScanConfigToml {
    /// Convert to runtime SchedulerConfig
    pub fn to_runtime_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            batch_size: self.batch_size,
            batch_delay: self.batch_delay,
        }
    }
}

impl CacheConfigToml {
    /// Convert to runtime CacheConfig
    pub fn to_runtime_config(&self) -> CacheConfig {
        CacheConfig {
            ttl: self.ttl,
            sweep_interval: self.sweep_interval,
            sweep_enabled: self.sweep_enabled,
        }
    }
}
