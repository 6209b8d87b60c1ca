//! Memoized fetch cache
//!
//! This module provides the process-lifetime cache that sits in front of the
//! chart feed. Entries carry an absolute expiry; an expired entry is treated
//! as absent the moment it expires, whether or not it has been swept yet.
//!
//! # Module Organization
//!
//! - [`config`] - TTL and sweep settings
//! - [`store`] - The [`MemoCache`] handle and its `get_or_compute` primitive
//! - [`stats`] - Hit/miss/eviction counters
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use storefront_trends::app::cache::MemoCache;
//!
//! # async fn example() -> Result<(), std::io::Error> {
//! let cache: MemoCache<String, Vec<String>> = MemoCache::new();
//!
//! let value = cache
//!     .get_or_compute(
//!         "chart:US:top-free".to_string(),
//!         || async { Ok::<_, std::io::Error>(vec!["123".to_string()]) },
//!         Duration::from_secs(3600),
//!     )
//!     .await?;
//! assert_eq!(value.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod stats;
pub mod store;

// Re-export main public API
pub use config::CacheConfig;
pub use stats::CacheStats;
pub use store::{CacheEntry, MemoCache};

use crate::app::models::{ChartKey, RankMap};

/// Cache of chart snapshots shared by every scan in the process
pub type ChartCache = MemoCache<ChartKey, RankMap>;
