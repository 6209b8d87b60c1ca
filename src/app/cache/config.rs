//! Cache configuration types and defaults

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::cache;

/// Configuration for the memoized fetch cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Lifetime of a cached chart snapshot
    pub ttl: Duration,
    /// Interval between background sweeps of expired entries
    pub sweep_interval: Duration,
    /// Run the background sweeper at all
    pub sweep_enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: cache::CHART_TTL,
            sweep_interval: cache::SWEEP_INTERVAL,
            sweep_enabled: true,
        }
    }
}

impl CacheConfig {
    /// Set the entry lifetime
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the sweep interval
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.ttl.is_zero() {
            return Err("Cache TTL cannot be zero".to_string());
        }

        if self.sweep_enabled && self.sweep_interval.is_zero() {
            return Err("Sweep interval cannot be zero".to_string());
        }

        Ok(())
    }
}
