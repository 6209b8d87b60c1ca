//! Chart client against a local feed server
//!
//! Covers feed parsing over real HTTP, memoization of successful charts and
//! absorption of failing storefronts into empty charts.

mod common;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use common::{chart_path, feed_body, FeedServer, Route};
use storefront_trends::app::{
    BreadthPreset, CacheConfig, ChartCache, ChartCategory, ChartClient, ChartSource, ClientConfig,
    SchedulerConfig, TrendingEngine,
};

use ChartCategory::{TopFree, TopPaid};

fn route(status: u16, body: impl Into<String>) -> Route {
    Route {
        status,
        body: body.into(),
    }
}

/// Client without retries or meaningful rate limiting
fn client_for(server: &FeedServer, cache_config: &CacheConfig) -> ChartClient {
    let mut config = ClientConfig::default()
        .with_base_url(server.base_url.clone())
        .with_max_retries(0)
        .with_request_timeout(Duration::from_secs(5));
    config.rate_limit_rps = 1000;
    ChartClient::with_config(config, ChartCache::new(), cache_config).unwrap()
}

/// Quick-preset storefronts with one good chart and three failing ones
fn mixed_routes() -> HashMap<String, Route> {
    HashMap::from([
        (chart_path("US", TopFree), route(200, feed_body(&["111", "222", "333"]))),
        (chart_path("GB", TopFree), route(500, "internal error")),
        (chart_path("CA", TopFree), route(200, "<html>maintenance</html>")),
        (chart_path("AU", TopPaid), route(429, "slow down")),
    ])
}

#[tokio::test]
async fn test_fetch_chart_parses_feed() {
    let server = FeedServer::start(HashMap::from([(
        chart_path("JP", TopPaid),
        route(
            200,
            r#"{"feed": {"entry": {"id": {"attributes": {"im:id": "42"}}}}}"#,
        ),
    )]))
    .await;
    let client = client_for(&server, &CacheConfig::default());

    let chart = client.fetch_chart("jp", TopPaid).await;
    assert_eq!(chart.rank_of("42"), Some(1));
    assert_eq!(server.requests(), 1);

    let again = client.fetch_chart("JP", TopPaid).await;
    assert!(Arc::ptr_eq(&chart, &again));
    assert_eq!(server.requests(), 1);

    let stats = client.cache().stats().await;
    assert_eq!((stats.hits, stats.misses, stats.live_entries), (1, 1, 1));
}

#[tokio::test]
async fn test_scan_survives_failing_storefronts() {
    let server = FeedServer::start(mixed_routes()).await;
    let client = Arc::new(client_for(&server, &CacheConfig::default()));
    let engine = TrendingEngine::new(
        client.clone(),
        SchedulerConfig::default()
            .with_batch_size(4)
            .with_batch_delay(Duration::ZERO),
    );

    let report = engine
        .scan(&["222", "999"], BreadthPreset::Quick, None)
        .await;

    assert_eq!(report.charts_fetched, 10);
    assert_eq!(report.charts_with_data, 1);
    assert_eq!(report.summary.total_trending_countries, 1);
    let us = report.summary.country("US").unwrap();
    assert_eq!((us.app_id.as_str(), us.best_rank), ("222", 2));
    assert!(!report.summary.app("999").unwrap().is_trending());
    assert_eq!(server.requests(), 10);

    // Only the seven successful charts are memoized
    assert_eq!(client.cache().len().await, 7);
}

#[tokio::test]
async fn test_rescan_only_refetches_failures() {
    let server = FeedServer::start(mixed_routes()).await;
    let client = Arc::new(client_for(&server, &CacheConfig::default()));
    let engine = TrendingEngine::new(
        client.clone(),
        SchedulerConfig::default().with_batch_delay(Duration::ZERO),
    );

    let first = engine.build_summary(&["111"], BreadthPreset::Quick).await;
    assert_eq!(server.requests(), 10);

    let second = engine.build_summary(&["111"], BreadthPreset::Quick).await;
    assert_eq!(second, first);
    assert_eq!(server.requests(), 13);
}

#[tokio::test]
async fn test_expired_charts_are_refetched() {
    let server = FeedServer::start(HashMap::from([(
        chart_path("US", TopFree),
        route(200, feed_body(&["7"])),
    )]))
    .await;
    let client = client_for(
        &server,
        &CacheConfig::default().with_ttl(Duration::from_millis(50)),
    );

    assert_eq!(client.fetch_chart("US", TopFree).await.rank_of("7"), Some(1));
    assert_eq!(client.fetch_chart("US", TopFree).await.rank_of("7"), Some(1));
    assert_eq!(server.requests(), 1);

    tokio::time::sleep(Duration::from_millis(120)).await;
    assert_eq!(client.fetch_chart("US", TopFree).await.rank_of("7"), Some(1));
    assert_eq!(server.requests(), 2);
}
