//! Core application logic for Storefront Trends
//!
//! This module contains the chart pipeline: the storefront registry, the
//! memoized chart cache, the feed client, the batch scheduler, the reducer and
//! the engine tying them together, plus display helpers.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use storefront_trends::app::{
//!     BreadthPreset, CacheConfig, ChartCache, ChartClient, ClientConfig, SchedulerConfig,
//!     TrendingEngine,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let cache = ChartCache::new();
//! let client = ChartClient::with_config(ClientConfig::default(), cache, &CacheConfig::default())?;
//! let engine = TrendingEngine::new(Arc::new(client), SchedulerConfig::default());
//!
//! let summary = engine
//!     .build_summary(&["389801252", "284882215"], BreadthPreset::Major)
//!     .await;
//! println!(
//!     "trending in {} of {} countries",
//!     summary.total_trending_countries, summary.countries_scanned
//! );
//! # Ok(())
//! # }
//! ```

pub mod app_id;
pub mod cache;
pub mod client;
pub mod countries;
pub mod engine;
pub mod format;
pub mod models;
pub mod reducer;
pub mod scheduler;

// Re-export main public API
pub use app_id::parse_app_id;
pub use cache::{CacheConfig, CacheStats, ChartCache, MemoCache};
pub use client::{ChartClient, ChartSource, ClientConfig};
pub use countries::{lookup, resolve_breadth, BreadthPreset, Country, Region};
pub use engine::{PrefetchReport, ScanReport, TrendingEngine};
pub use models::{
    ChartCategory, ChartKey, ChartSnapshots, PerAppTrending, PerCountryTrending, RankMap,
    TrendingRecord, TrendingSummary,
};
pub use reducer::{reduce, Reduction};
pub use scheduler::{BatchScheduler, ProgressSender, ScanProgress, SchedulerConfig};
