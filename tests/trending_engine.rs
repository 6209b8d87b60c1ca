//! End-to-end properties of the trending engine over an in-process source
//!
//! These tests drive [`TrendingEngine`] with scripted charts and check the
//! aggregate it produces, independent of any network.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::ScriptedSource;
use storefront_trends::app::{
    BreadthPreset, ChartCategory, ChartSource, ScanProgress, SchedulerConfig, TrendingEngine,
    TrendingSummary,
};
use tokio::sync::mpsc;

use ChartCategory::{TopFree, TopPaid};

/// Scheduler without inter-batch pauses
fn fast_scheduler(batch_size: usize) -> SchedulerConfig {
    SchedulerConfig::default()
        .with_batch_size(batch_size)
        .with_batch_delay(Duration::ZERO)
}

fn engine(source: Arc<ScriptedSource>, batch_size: usize) -> TrendingEngine {
    let source: Arc<dyn ChartSource> = source;
    TrendingEngine::new(source, fast_scheduler(batch_size))
}

/// US and GB are both part of the quick preset
fn reference_source() -> ScriptedSource {
    ScriptedSource::new()
        .with_chart("US", TopFree, &["app2", "x", "app1"])
        .with_rank("GB", TopFree, "app1", 10)
}

fn country_ranks(summary: &TrendingSummary) -> Vec<(String, u32, String)> {
    summary
        .countries
        .iter()
        .map(|c| (c.country_code.clone(), c.best_rank, c.app_id.clone()))
        .collect()
}

#[tokio::test]
async fn test_reference_scenario() {
    let source = Arc::new(reference_source());
    let summary = engine(source.clone(), 4)
        .build_summary(&["app1", "app2"], BreadthPreset::Quick)
        .await;

    assert!(summary.has_trending);
    assert_eq!(summary.total_trending_countries, 2);
    assert_eq!(summary.countries_scanned, 5);
    assert_eq!(summary.breadth, BreadthPreset::Quick);
    assert_eq!(
        country_ranks(&summary),
        vec![
            ("US".to_string(), 1, "app2".to_string()),
            ("GB".to_string(), 10, "app1".to_string()),
        ]
    );
    assert_eq!(summary.countries[0].country_name, "United States");

    let apps: Vec<&str> = summary
        .per_app_trending
        .iter()
        .map(|app| app.app_id.as_str())
        .collect();
    assert_eq!(apps, vec!["app1", "app2"]);

    let app1 = summary.app("app1").unwrap();
    let placements: Vec<(&str, u32)> = app1
        .trending_in()
        .iter()
        .map(|r| (r.country.as_str(), r.rank))
        .collect();
    assert_eq!(placements, vec![("US", 3), ("GB", 10)]);
    assert_eq!(app1.best_rank(), Some(3));
    assert_eq!(app1.best_country(), Some("US"));

    let app2 = summary.app("app2").unwrap();
    assert_eq!(app2.best_rank(), Some(1));
    assert_eq!(app2.best_country(), Some("US"));

    // Five countries times two categories
    assert_eq!(source.calls(), 10);
}

#[tokio::test]
async fn test_summary_ignores_completion_order() {
    let build = |seed: u64| {
        let source = ScriptedSource::new()
            .with_rank("US", TopFree, "a", 4)
            .with_rank("US", TopPaid, "b", 4)
            .with_rank("GB", TopPaid, "a", 2)
            .with_rank("IN", TopFree, "b", 7)
            .with_rank("CA", TopFree, "a", 7)
            .with_rank("AU", TopPaid, "c", 1)
            .with_jitter(seed, 15);
        engine(Arc::new(source), 3)
    };

    let baseline = build(1)
        .build_summary(&["a", "b", "c"], BreadthPreset::Quick)
        .await;
    for seed in 2..6 {
        let summary = build(seed)
            .build_summary(&["a", "b", "c"], BreadthPreset::Quick)
            .await;
        assert_eq!(summary, baseline, "seed {} diverged", seed);
    }

    // US ties at rank 4: the top-free chart is reduced first and keeps it
    let us = baseline.country("US").unwrap();
    assert_eq!((us.app_id.as_str(), us.category), ("a", TopFree));
}

#[tokio::test]
async fn test_failed_chart_does_not_hide_others() {
    // Every IN chart is missing, standing in for an unreachable storefront
    let source = ScriptedSource::new()
        .with_rank("US", TopPaid, "app", 5)
        .with_rank("AU", TopFree, "app", 2);
    let report = engine(Arc::new(source), 10)
        .scan(&["app"], BreadthPreset::Quick, None)
        .await;

    assert_eq!(report.charts_fetched, 10);
    assert_eq!(report.charts_with_data, 2);
    assert_eq!(report.summary.total_trending_countries, 2);
    assert_eq!(report.summary.countries[0].country_code, "AU");
    assert_eq!(report.summary.app("app").unwrap().country_count(), 2);
}

#[test]
fn test_empty_request_skips_fetching() {
    let source = Arc::new(reference_source());
    let engine = engine(source.clone(), 4);

    let summary = tokio_test::block_on(engine.build_summary::<&str>(&[], BreadthPreset::Major));
    assert_eq!(summary, TrendingSummary::empty(BreadthPreset::Major, 20));

    let blanks = tokio_test::block_on(engine.build_summary(&["  ", ""], BreadthPreset::Quick));
    assert!(!blanks.has_trending);
    assert_eq!(blanks.countries_scanned, 5);
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_progress_reports_every_chart() {
    let source = Arc::new(reference_source());
    let (tx, mut rx) = mpsc::unbounded_channel::<ScanProgress>();

    let summary = engine(source, 3)
        .build_summary_with_progress(&["app1"], BreadthPreset::Quick, Some(&tx))
        .await;
    drop(tx);

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }

    assert_eq!(events.len(), 10);
    let completed: Vec<usize> = events.iter().map(|e| e.completed).collect();
    assert_eq!(completed, (1..=10).collect::<Vec<_>>());
    assert!(events.iter().all(|e| e.total == 10));
    assert_eq!(events.iter().filter(|e| e.is_hit()).count(), 2);
    assert!(events.last().unwrap().is_last());
    assert!(summary.has_trending);
}

#[tokio::test]
async fn test_single_category_scan() {
    let source = Arc::new(reference_source().with_rank("US", TopPaid, "app1", 1));
    let summary = engine(source.clone(), 5)
        .with_categories(&[TopFree])
        .build_summary(&["app1"], BreadthPreset::Quick)
        .await;

    assert_eq!(source.calls(), 5);
    assert_eq!(summary.country("US").unwrap().best_rank, 3);
}
