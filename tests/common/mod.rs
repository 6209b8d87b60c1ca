//! Shared fixtures for integration tests
//!
//! - [`ScriptedSource`]: in-process chart source with canned charts
//! - [`FeedServer`]: axum server serving canned RSS JSON feeds

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use storefront_trends::app::{ChartCategory, ChartKey, ChartSource, RankMap};

/// Chart source answering from a fixed table
///
/// Unknown charts come back empty. Optional random latency shuffles the
/// completion order between runs.
#[derive(Default)]
pub struct ScriptedSource {
    charts: HashMap<ChartKey, Arc<RankMap>>,
    calls: AtomicUsize,
    max_latency_ms: u64,
    rng: Mutex<Option<fastrand::Rng>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a chart whose entries are ranked in the given order
    pub fn with_chart(mut self, country: &str, category: ChartCategory, ids: &[&str]) -> Self {
        let chart = RankMap::from_ordered(ids.iter().map(|id| Some(*id)));
        self.charts
            .insert(ChartKey::new(country, category), Arc::new(chart));
        self
    }

    /// Add a chart with `id` at `rank`, filling earlier slots with other apps
    pub fn with_rank(self, country: &str, category: ChartCategory, id: &str, rank: u32) -> Self {
        let mut ids: Vec<String> = (1..rank)
            .map(|n| format!("{}-{}-filler-{}", country, category, n))
            .collect();
        ids.push(id.to_string());
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        self.with_chart(country, category, &refs)
    }

    /// Sleep a random 0..=max_ms before answering
    pub fn with_jitter(mut self, seed: u64, max_ms: u64) -> Self {
        self.max_latency_ms = max_ms;
        self.rng = Mutex::new(Some(fastrand::Rng::with_seed(seed)));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn latency(&self) -> Option<Duration> {
        let mut rng = self.rng.lock().unwrap();
        rng.as_mut()
            .map(|rng| Duration::from_millis(rng.u64(0..=self.max_latency_ms)))
    }
}

#[async_trait]
impl ChartSource for ScriptedSource {
    async fn fetch_chart(&self, country: &str, category: ChartCategory) -> Arc<RankMap> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency() {
            tokio::time::sleep(latency).await;
        }
        self.charts
            .get(&ChartKey::new(country, category))
            .cloned()
            .unwrap_or_default()
    }
}

/// Canned response for one path
#[derive(Clone)]
pub struct Route {
    pub status: u16,
    pub body: String,
}

impl Route {
    /// 200 with a feed that has no entries
    pub fn empty_feed() -> Self {
        Self {
            status: 200,
            body: r#"{"feed": {}}"#.to_string(),
        }
    }
}

/// RSS JSON body listing `ids` in chart order
pub fn feed_body(ids: &[&str]) -> String {
    let entries: Vec<String> = ids
        .iter()
        .map(|id| format!(r#"{{"id": {{"attributes": {{"im:id": "{}"}}}}}}"#, id))
        .collect();
    format!(r#"{{"feed": {{"entry": [{}]}}}}"#, entries.join(","))
}

#[derive(Clone)]
struct FeedState {
    routes: Arc<HashMap<String, Route>>,
    requests: Arc<AtomicUsize>,
}

/// Catch-all handler answering from the route table
async fn serve_feed(State(state): State<FeedState>, uri: Uri) -> impl IntoResponse {
    state.requests.fetch_add(1, Ordering::SeqCst);
    let route = state
        .routes
        .get(uri.path())
        .cloned()
        .unwrap_or_else(Route::empty_feed);
    let status = StatusCode::from_u16(route.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], route.body)
}

/// Embedded HTTP server standing in for the chart feed
///
/// Paths without a route answer 200 with an empty feed. Every request is
/// counted.
pub struct FeedServer {
    pub base_url: String,
    requests: Arc<AtomicUsize>,
    handle: JoinHandle<()>,
}

impl FeedServer {
    pub async fn start(routes: HashMap<String, Route>) -> Self {
        let requests = Arc::new(AtomicUsize::new(0));
        let state = FeedState {
            routes: Arc::new(routes),
            requests: Arc::clone(&requests),
        };
        let app = Router::new().fallback(serve_feed).with_state(state);

        // Bind to random available port
        let addr = SocketAddr::from(([127, 0, 0, 1], 0));
        let listener = TcpListener::bind(addr).await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            requests,
            handle,
        }
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl Drop for FeedServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Feed path the client requests for one chart at the default depth
pub fn chart_path(country: &str, category: ChartCategory) -> String {
    format!(
        "/{}/rss/{}/limit=200/json",
        country.to_ascii_lowercase(),
        category.feed_name()
    )
}
