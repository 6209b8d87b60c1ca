//! Trending aggregation entry point
//!
//! [`TrendingEngine`] ties the pipeline together: resolve the breadth preset
//! to a country list, fetch every (country, category) chart through the batch
//! scheduler, and reduce the snapshots into a [`TrendingSummary`].
//!
//! Building a summary always succeeds. Unreachable storefronts only reduce
//! the number of hits, and an empty app list returns an empty summary without
//! touching the network.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::info;

use crate::app::client::ChartSource;
use crate::app::countries::{self, BreadthPreset, Country};
use crate::app::models::{ChartCategory, ChartSnapshots, TrendingSummary};
use crate::app::reducer::{self, normalize_app_ids};
use crate::app::scheduler::progress::emit;
use crate::app::scheduler::{BatchScheduler, ProgressSender, SchedulerConfig};
use crate::constants::progress::PREFETCH_LOG_EVERY;

/// Summary plus timing for one scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub summary: TrendingSummary,
    pub started_at: DateTime<Utc>,
    #[serde(with = "humantime_serde")]
    pub elapsed: Duration,
    /// Charts requested from the source
    pub charts_fetched: usize,
    /// Charts that came back with at least one entry
    pub charts_with_data: usize,
}

/// Outcome of warming the cache for a preset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefetchReport {
    pub breadth: BreadthPreset,
    pub charts_fetched: usize,
    pub charts_with_data: usize,
    pub elapsed: Duration,
}

/// Aggregates chart placements for a set of applications
#[derive(Clone)]
pub struct TrendingEngine {
    source: Arc<dyn ChartSource>,
    scheduler: BatchScheduler,
    categories: Vec<ChartCategory>,
}

impl std::fmt::Debug for TrendingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrendingEngine")
            .field("scheduler", &self.scheduler)
            .field("categories", &self.categories)
            .finish_non_exhaustive()
    }
}

impl TrendingEngine {
    /// Create an engine scanning every chart category
    pub fn new(source: Arc<dyn ChartSource>, config: SchedulerConfig) -> Self {
        Self {
            source,
            scheduler: BatchScheduler::new(config),
            categories: ChartCategory::ALL.to_vec(),
        }
    }

    /// Restrict scans to the given categories
    pub fn with_categories(mut self, categories: &[ChartCategory]) -> Self {
        let mut categories = categories.to_vec();
        categories.sort();
        categories.dedup();
        self.categories = categories;
        self
    }

    pub fn categories(&self) -> &[ChartCategory] {
        &self.categories
    }

    /// Build the trending summary for `app_ids` across `preset`
    pub async fn build_summary<S: AsRef<str>>(
        &self,
        app_ids: &[S],
        preset: BreadthPreset,
    ) -> TrendingSummary {
        self.build_summary_with_progress(app_ids, preset, None).await
    }

    /// Same as [`build_summary`](Self::build_summary), emitting a
    /// [`ScanProgress`](crate::app::scheduler::ScanProgress) per settled fetch
    pub async fn build_summary_with_progress<S: AsRef<str>>(
        &self,
        app_ids: &[S],
        preset: BreadthPreset,
        progress: Option<&ProgressSender>,
    ) -> TrendingSummary {
        self.run(app_ids, preset, progress).await.0
    }

    /// Build a summary and report when the scan ran and how long it took
    pub async fn scan<S: AsRef<str>>(
        &self,
        app_ids: &[S],
        preset: BreadthPreset,
        progress: Option<&ProgressSender>,
    ) -> ScanReport {
        let started_at = Utc::now();
        let clock = Instant::now();
        let (summary, snapshots) = self.run(app_ids, preset, progress).await;

        ScanReport {
            summary,
            started_at,
            elapsed: clock.elapsed(),
            charts_fetched: snapshots.len(),
            charts_with_data: snapshots.responsive_count(),
        }
    }

    async fn run<S: AsRef<str>>(
        &self,
        app_ids: &[S],
        preset: BreadthPreset,
        progress: Option<&ProgressSender>,
    ) -> (TrendingSummary, ChartSnapshots) {
        let countries = countries::resolve_breadth(preset);
        let app_ids = normalize_app_ids(app_ids);

        if app_ids.is_empty() {
            info!("No app IDs requested, skipping {} scan", preset);
            return (
                TrendingSummary::empty(preset, countries.len()),
                ChartSnapshots::new(),
            );
        }

        info!(
            "Scanning {} apps across {} countries ({} breadth)",
            app_ids.len(),
            countries.len(),
            preset
        );

        let snapshots = self.fetch(&countries, progress).await;
        let summary = reducer::reduce(&app_ids, &snapshots).into_summary(preset, countries.len());

        info!(
            "Scan complete: trending in {} of {} countries",
            summary.total_trending_countries, summary.countries_scanned
        );

        (summary, snapshots)
    }

    async fn fetch(&self, countries: &[Country], progress: Option<&ProgressSender>) -> ChartSnapshots {
        self.scheduler
            .fetch_all(self.source.as_ref(), countries, &self.categories, progress)
            .await
    }

    /// Fetch every chart of `preset` without reducing, so later scans hit
    /// the cache
    pub async fn prefetch(
        &self,
        preset: BreadthPreset,
        progress: Option<&ProgressSender>,
    ) -> PrefetchReport {
        let countries = countries::resolve_breadth(preset);
        let clock = Instant::now();
        info!("Prefetching {} charts for {} countries", preset, countries.len());

        let (tx, mut rx) = mpsc::unbounded_channel();
        let fetch = async {
            let snapshots = self.fetch(&countries, Some(&tx)).await;
            drop(tx);
            snapshots
        };
        let relay = async {
            while let Some(event) = rx.recv().await {
                if event.completed % PREFETCH_LOG_EVERY == 0 || event.is_last() {
                    info!("Prefetched {}/{} charts", event.completed, event.total);
                }
                emit(progress, event);
            }
        };
        let (snapshots, ()) = tokio::join!(fetch, relay);

        let report = PrefetchReport {
            breadth: preset,
            charts_fetched: snapshots.len(),
            charts_with_data: snapshots.responsive_count(),
            elapsed: clock.elapsed(),
        };
        info!(
            "Prefetch complete: {}/{} charts returned data in {:.1}s",
            report.charts_with_data,
            report.charts_fetched,
            report.elapsed.as_secs_f64()
        );
        report
    }
}
