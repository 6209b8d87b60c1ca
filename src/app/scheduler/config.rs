//! Configuration for the batch fetch scheduler

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::scan;

/// Configuration for batched chart fetching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Maximum number of fetches in flight at once
    pub batch_size: usize,
    /// Pause between successive batches
    pub batch_delay: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            batch_size: scan::DEFAULT_BATCH_SIZE,
            batch_delay: scan::DEFAULT_BATCH_DELAY,
        }
    }
}

impl SchedulerConfig {
    /// Set the batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the inter-batch delay
    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("Batch size cannot be zero".to_string());
        }

        if self.batch_size > scan::MAX_BATCH_SIZE {
            return Err(format!(
                "Batch size cannot exceed {}",
                scan::MAX_BATCH_SIZE
            ));
        }

        Ok(())
    }
}
