//! Application constants for Storefront Trends
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain for maintainability and clarity.

use std::time::Duration;

/// Environment variable names
pub mod env {
    /// Overrides the chart feed base URL (mirrors, local fixture servers)
    pub const FEED_BASE_URL: &str = "STOREFRONT_TRENDS_FEED_URL";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = "Storefront-Trends/0.1.0 (Chart Scanner)";

    /// Per-request timeout for a single chart fetch
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Upper bound accepted for the per-request timeout
    pub const MAX_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// Maximum idle connections per host in pool
    pub const POOL_MAX_PER_HOST: usize = 16;
}

/// Rate limiting and retry configuration
pub mod limits {
    /// Default rate limit for feed requests (requests per second)
    pub const DEFAULT_RATE_LIMIT_RPS: u32 = 20;

    /// Maximum retry attempts for a failed feed request
    pub const MAX_RETRIES: u32 = 2;

    /// Base delay for exponential backoff (milliseconds)
    pub const RETRY_BASE_DELAY_MS: u64 = 250;

    /// Upper bound on random jitter added by the rate limiter (milliseconds)
    pub const RATE_LIMIT_JITTER_MS: u64 = 50;
}

/// Upstream chart feed
pub mod feed {
    /// Legacy iTunes RSS feed host
    pub const BASE_URL: &str = "https://itunes.apple.com";

    /// Number of entries requested per chart
    pub const DEFAULT_CHART_DEPTH: u32 = 200;

    /// Largest chart depth the feed serves
    pub const MAX_CHART_DEPTH: u32 = 200;

    /// Feed name for the free chart
    pub const TOP_FREE_FEED: &str = "topfreeapplications";

    /// Feed name for the paid chart
    pub const TOP_PAID_FEED: &str = "toppaidapplications";
}

/// Scan scheduling
pub mod scan {
    use super::Duration;

    /// Tasks in flight at once
    pub const DEFAULT_BATCH_SIZE: usize = 10;

    /// Pause between consecutive batches
    pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(100);

    /// Upper bound on concurrent fetches per batch
    pub const MAX_BATCH_SIZE: usize = 64;
}

/// Memoized fetch cache
pub mod cache {
    use super::Duration;

    /// Lifetime of a cached chart snapshot
    pub const CHART_TTL: Duration = Duration::from_secs(60 * 60);

    /// Interval between background sweeps of expired entries
    pub const SWEEP_INTERVAL: Duration = Duration::from_secs(120);

    /// Shortest interval the sweeper will run at
    pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(100);
}

/// Progress reporting
pub mod progress {
    /// Prefetch logs a progress line every this many completed tasks
    pub const PREFETCH_LOG_EVERY: usize = 20;

    /// Spinner/progress bar redraw interval (milliseconds)
    pub const TICK_MS: u64 = 120;
}

/// Logging
pub mod logging {
    /// Default log level
    pub const DEFAULT_LOG_LEVEL: &str = "warn";
}

// Re-export commonly used constants for convenience
pub use cache::CHART_TTL;
pub use http::{DEFAULT_TIMEOUT as HTTP_TIMEOUT, USER_AGENT};
pub use limits::{DEFAULT_RATE_LIMIT_RPS, MAX_RETRIES, RETRY_BASE_DELAY_MS};
pub use scan::DEFAULT_BATCH_SIZE;
