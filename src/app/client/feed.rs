//! iTunes RSS chart feed format
//!
//! The legacy RSS JSON feed looks like
//! `{"feed": {"entry": [{"id": {"attributes": {"im:id": "123"}}}, ...]}}`.
//! A chart with a single entry is served as an object rather than an array,
//! and any field may be missing. Entries without an `im:id` are skipped and
//! do not take up a rank.

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::app::models::{ChartCategory, RankMap};
use crate::errors::{FeedError, FeedResult};

/// JSON pointer to an entry's application identifier
const APP_ID_POINTER: &str = "/id/attributes/im:id";

#[derive(Debug, Deserialize)]
struct RssDocument {
    #[serde(default)]
    feed: Option<RssFeed>,
}

#[derive(Debug, Deserialize)]
struct RssFeed {
    /// Entries stay untyped so one oddly shaped entry cannot fail the chart
    #[serde(default)]
    entry: Option<OneOrMany<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

/// Identifier of one feed entry, if it carries a usable one
fn entry_app_id(entry: &Value) -> Option<String> {
    let id = match entry.pointer(APP_ID_POINTER)? {
        Value::String(id) => id.trim().to_string(),
        Value::Number(id) => id.to_string(),
        _ => return None,
    };
    (!id.is_empty()).then_some(id)
}

/// Parse a feed body into a rank map
///
/// # Errors
///
/// Returns `FeedError::Parse` if the body is not a JSON chart document
pub fn parse_chart(body: &str) -> FeedResult<RankMap> {
    let document: RssDocument = serde_json::from_str(body)?;

    let entries = match document.feed.and_then(|feed| feed.entry) {
        Some(OneOrMany::Many(entries)) => entries,
        Some(OneOrMany::One(entry)) => vec![entry],
        None => Vec::new(),
    };

    Ok(RankMap::from_ordered(entries.iter().map(entry_app_id)))
}

/// Build the feed URL for one chart
///
/// Layout: `{base}/{country}/rss/{feed}/limit={depth}/json`, country lower-cased.
pub fn chart_url(
    base: &Url,
    country: &str,
    category: ChartCategory,
    depth: u32,
) -> FeedResult<Url> {
    let path = format!(
        "{}/rss/{}/limit={}/json",
        country.trim().to_ascii_lowercase(),
        category.feed_name(),
        depth
    );

    // Url::join replaces the last segment unless the base ends with '/'
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        base.set_path(&format!("{}/", base.path()));
    }

    base.join(&path).map_err(|e| FeedError::InvalidUrl {
        url: format!("{}{}", base, path),
        error: e.to_string(),
    })
}
