//! Batched chart fetching
//!
//! The scheduler expands a country list and a category list into the full
//! cross product of chart fetches, then drives a [`ChartSource`] through it in
//! fixed-size concurrent batches:
//!
//! - every task is known up front, so progress reports a stable total
//! - at most `batch_size` fetches are in flight at once
//! - a fixed `batch_delay` separates consecutive batches (never before the
//!   first or after the last)
//! - a [`ScanProgress`] event is emitted as each task settles, in completion
//!   order
//!
//! Sources never fail, so one slow or broken storefront only shows up as an
//! empty chart and never holds back the rest of its batch beyond its own
//! latency.

pub mod config;
pub mod progress;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, info};

use crate::app::client::ChartSource;
use crate::app::countries::Country;
use crate::app::models::{ChartCategory, ChartKey, ChartSnapshots};

pub use config::SchedulerConfig;
pub use progress::{ProgressSender, ScanProgress};

/// Runs chart fetches in rate-friendly batches
#[derive(Debug, Clone, Default)]
pub struct BatchScheduler {
    config: SchedulerConfig,
}

impl BatchScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Cross product of countries and categories, country-major
    pub fn plan(countries: &[Country], categories: &[ChartCategory]) -> Vec<ChartKey> {
        countries
            .iter()
            .flat_map(|country| {
                categories
                    .iter()
                    .map(move |category| ChartKey::new(country.code.as_str(), *category))
            })
            .collect()
    }

    /// Fetch every (country, category) chart
    ///
    /// Always returns one snapshot per distinct planned key; failed fetches
    /// appear as empty charts.
    pub async fn fetch_all<S>(
        &self,
        source: &S,
        countries: &[Country],
        categories: &[ChartCategory],
        progress: Option<&ProgressSender>,
    ) -> ChartSnapshots
    where
        S: ChartSource + ?Sized,
    {
        let tasks = Self::plan(countries, categories);
        let total = tasks.len();
        let batch_size = self.config.batch_size.max(1);
        let mut snapshots = ChartSnapshots::new();
        let mut completed = 0;

        info!(
            "Fetching {} charts ({} countries x {} categories) in batches of {}",
            total,
            countries.len(),
            categories.len(),
            batch_size
        );

        for (index, batch) in tasks.chunks(batch_size).enumerate() {
            if index > 0 && !self.config.batch_delay.is_zero() {
                tokio::time::sleep(self.config.batch_delay).await;
            }

            debug!("Starting batch {} with {} fetches", index + 1, batch.len());

            let mut in_flight: FuturesUnordered<_> = batch
                .iter()
                .map(|key| async move {
                    let chart = source.fetch_chart(&key.country, key.category).await;
                    (key, chart)
                })
                .collect();

            while let Some((key, chart)) = in_flight.next().await {
                completed += 1;
                progress::emit(
                    progress,
                    ScanProgress {
                        completed,
                        total,
                        key: key.clone(),
                        entries: chart.len(),
                    },
                );
                snapshots.insert(key.clone(), chart);
            }
        }

        info!(
            "Fetched {} charts, {} with data",
            snapshots.len(),
            snapshots.responsive_count()
        );

        snapshots
    }
}
