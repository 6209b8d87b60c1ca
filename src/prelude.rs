//! Prelude module for Storefront Trends Library
//!
//! This module re-exports the most commonly used items from the library,
//! providing a convenient way to import everything needed for typical usage
//! with a single `use storefront_trends::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use storefront_trends::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ChartClient::new()?;
//!     let engine = TrendingEngine::new(Arc::new(client), SchedulerConfig::default());
//!     let summary = engine.build_summary(&["389801252"], BreadthPreset::Quick).await;
//!     println!("{}", trending_description(&summary));
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, Result};

// Essential app components that are used in most integrations
pub use crate::app::{
    // Registry
    BreadthPreset,
    // Cache
    CacheConfig,
    CacheStats,
    ChartCache,
    // Data types
    ChartCategory,
    // Feed access
    ChartClient,
    ChartKey,
    ChartSource,
    ClientConfig,
    Country,
    PerAppTrending,
    PerCountryTrending,
    RankMap,
    // Scanning
    ScanProgress,
    ScanReport,
    SchedulerConfig,
    TrendingEngine,
    TrendingSummary,
};

// Display helpers
pub use crate::app::format::{scan_headline, trending_description};

// Commonly used constants
pub use crate::constants::{CHART_TTL, DEFAULT_BATCH_SIZE, DEFAULT_RATE_LIMIT_RPS, USER_AGENT};

// Standard library re-exports that are commonly needed
pub use std::sync::Arc;

// Common external crate re-exports for convenience
pub use tokio;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_imports() {
        let _cache_config = CacheConfig::default();
        let _client_config = ClientConfig::default();
        let _scheduler_config = SchedulerConfig::default();

        assert_eq!(DEFAULT_BATCH_SIZE, 10);
        assert!(USER_AGENT.contains("Storefront-Trends"));
    }

    #[tokio::test]
    async fn test_prelude_integration_pattern() {
        let cache = ChartCache::new();
        let client = ChartClient::with_config(
            ClientConfig::default(),
            cache.clone(),
            &CacheConfig::default(),
        )
        .unwrap();
        let engine = TrendingEngine::new(Arc::new(client), SchedulerConfig::default());

        // No app IDs means no network traffic
        let empty: [&str; 0] = [];
        let summary = engine.build_summary(&empty, BreadthPreset::Quick).await;
        assert!(!summary.has_trending);
        assert_eq!(scan_headline(&summary), "not trending in any of 5 countries scanned");
        assert_eq!(cache.stats().await, CacheStats::default());
    }
}
