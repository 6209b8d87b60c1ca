//! Chart feed client
//!
//! This module turns one (country, category) pair into a [`RankMap`]. It is
//! organized into specialized components:
//! - `config`: HTTP client configuration and building
//! - `http`: Core HTTP operations with rate limiting and retries
//! - `feed`: RSS feed URL layout and payload parsing
//!
//! Fetching a chart never fails from the caller's point of view. Transport,
//! status and parse errors are logged and come back as an empty chart, so a
//! few unreachable storefronts cannot abort a multi-country scan.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use crate::app::cache::{CacheConfig, ChartCache};
use crate::app::models::{ChartCategory, ChartKey, RankMap};
use crate::errors::{ClientError, ClientResult, FeedResult};

pub mod config;
pub mod feed;
pub mod http;

pub use config::ClientConfig;

use http::HttpHandler;

/// Source of chart snapshots
///
/// Implementations must absorb their own failures and return an empty
/// chart instead.
#[async_trait]
pub trait ChartSource: Send + Sync {
    async fn fetch_chart(&self, country: &str, category: ChartCategory) -> Arc<RankMap>;
}

#[async_trait]
impl<S: ChartSource + ?Sized> ChartSource for Arc<S> {
    async fn fetch_chart(&self, country: &str, category: ChartCategory) -> Arc<RankMap> {
        (**self).fetch_chart(country, category).await
    }
}

/// Feed-backed chart source with memoization
#[derive(Debug)]
pub struct ChartClient {
    http_handler: HttpHandler,
    base_url: Url,
    chart_depth: u32,
    cache: ChartCache,
    ttl: Duration,
}

impl ChartClient {
    /// Creates a client with default settings and its own cache
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the HTTP client cannot be built
    pub fn new() -> ClientResult<Self> {
        Self::with_config(
            ClientConfig::default(),
            ChartCache::new(),
            &CacheConfig::default(),
        )
    }

    /// Creates a client sharing `cache` with the rest of the process
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the base URL, rate limit or HTTP client
    /// settings are invalid
    pub fn with_config(
        config: ClientConfig,
        cache: ChartCache,
        cache_config: &CacheConfig,
    ) -> ClientResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|_| ClientError::InvalidBaseUrl {
            url: config.base_url.clone(),
        })?;
        let client = config.build_http_client()?;
        let http_handler = HttpHandler::new(
            client,
            config.rate_limit_rps,
            config.max_retries,
            config.retry_base_delay,
        )?;

        debug!(
            "Created chart client for {} ({} rps, depth {})",
            base_url, config.rate_limit_rps, config.chart_depth
        );

        Ok(Self {
            http_handler,
            base_url,
            chart_depth: config.chart_depth,
            cache,
            ttl: cache_config.ttl,
        })
    }

    /// Handle to the chart cache
    pub fn cache(&self) -> &ChartCache {
        &self.cache
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn fetch_uncached(&self, key: &ChartKey) -> FeedResult<RankMap> {
        let url = feed::chart_url(&self.base_url, &key.country, key.category, self.chart_depth)?;
        let body = self.http_handler.get_text(&url).await?;
        let chart = feed::parse_chart(&body)?;
        debug!("Fetched {} with {} ranked apps", key, chart.len());
        Ok(chart)
    }
}

#[async_trait]
impl ChartSource for ChartClient {
    async fn fetch_chart(&self, country: &str, category: ChartCategory) -> Arc<RankMap> {
        let key = ChartKey::new(country, category);
        let result = self
            .cache
            .get_or_compute(key.clone(), || self.fetch_uncached(&key), self.ttl)
            .await;

        match result {
            Ok(chart) => chart,
            Err(e) => {
                warn!("Chart {} unavailable: {}", key, e);
                Arc::new(RankMap::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ChartClient::new().unwrap();
        assert_eq!(client.base_url().host_str(), Some("itunes.apple.com"));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = ClientConfig::default().with_base_url("not a url");
        let result = ChartClient::with_config(config, ChartCache::new(), &CacheConfig::default());
        assert!(matches!(result, Err(ClientError::InvalidBaseUrl { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_feed_yields_empty_chart() {
        // Bind then drop a listener so the port refuses connections
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = ClientConfig::default()
            .with_base_url(format!("http://127.0.0.1:{}", port))
            .with_max_retries(0);
        let client =
            ChartClient::with_config(config, ChartCache::new(), &CacheConfig::default()).unwrap();

        let chart = client.fetch_chart("US", ChartCategory::TopFree).await;
        assert!(chart.is_empty());
        // Failures are not memoized
        assert!(client.cache().is_empty().await);
    }
}
