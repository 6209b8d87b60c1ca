//! Error types for Storefront Trends
//!
//! Errors are grouped by the component that raises them. Note that upstream
//! feed failures (`FeedError`) never leave the chart client: they are logged
//! and turned into an empty chart so that a scan always completes.

use std::path::PathBuf;
use thiserror::Error;

/// Upstream chart feed errors
#[derive(Error, Debug)]
pub enum FeedError {
    /// Transport-level failure (connect, timeout, body read)
    #[error("Feed request failed")]
    Http(#[from] reqwest::Error),

    /// Feed returned a non-success status
    #[error("Feed error: HTTP {status}")]
    ServerError { status: u16 },

    /// Rate limit exceeded
    #[error("Feed rate limit exceeded. Server responded with HTTP 429")]
    RateLimitExceeded,

    /// Server overloaded
    #[error("Feed overloaded. Server responded with HTTP 503")]
    ServerOverloaded,

    /// Maximum retries exceeded
    #[error("Maximum retry attempts ({max_retries}) exceeded for feed request")]
    MaxRetriesExceeded { max_retries: u32 },

    /// Feed URL could not be built
    #[error("Invalid feed URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },

    /// Response body was not a chart document
    #[error("Malformed feed payload")]
    Parse(#[from] serde_json::Error),
}

/// HTTP client construction errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// reqwest refused the builder settings
    #[error("Failed to build HTTP client")]
    Build(#[from] reqwest::Error),

    /// Rate limiter needs a positive quota
    #[error("Rate limit must be non-zero")]
    InvalidRateLimit,

    /// Base URL did not parse
    #[error("Invalid feed base URL: {url}")]
    InvalidBaseUrl { url: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Configuration validation failed
    #[error("Configuration validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<String> },
}

/// User input errors (application identifiers)
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    /// Nothing to parse
    #[error("Input is empty")]
    Empty,

    /// A developer page was given where an app was expected
    #[error("Expected an app, got a developer link: {input}")]
    DeveloperLink { input: String },

    /// Not an App Store link or numeric identifier
    #[error("Could not find an App Store ID in: {input}")]
    Unrecognized { input: String },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Feed error
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// Client construction error
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Input error
    #[error(transparent)]
    Input(#[from] InputError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Check if the error is recoverable (transient)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Feed(FeedError::Http(_))
                | AppError::Feed(FeedError::RateLimitExceeded)
                | AppError::Feed(FeedError::ServerOverloaded)
                | AppError::Feed(FeedError::ServerError { .. })
        )
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Feed(_) => "feed",
            AppError::Client(_) => "client",
            AppError::Config(_) => "config",
            AppError::Input(_) => "input",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Feed result type alias
pub type FeedResult<T> = std::result::Result<T, FeedError>;

/// Client construction result type alias
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
