//! Data models for chart snapshots and trending results
//!
//! A scan produces one [`RankMap`] per ([`ChartKey`]) pair, collected into
//! [`ChartSnapshots`]. The reducer folds those into a [`TrendingSummary`].

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::app::countries::BreadthPreset;
use crate::constants::feed;

/// Ranked chart type within a storefront
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChartCategory {
    #[serde(rename = "top-free")]
    TopFree,
    #[serde(rename = "top-paid")]
    TopPaid,
}

impl ChartCategory {
    /// Every category, in canonical processing order
    pub const ALL: [ChartCategory; 2] = [ChartCategory::TopFree, ChartCategory::TopPaid];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartCategory::TopFree => "top-free",
            ChartCategory::TopPaid => "top-paid",
        }
    }

    /// Name of the upstream RSS feed for this chart
    pub fn feed_name(&self) -> &'static str {
        match self {
            ChartCategory::TopFree => feed::TOP_FREE_FEED,
            ChartCategory::TopPaid => feed::TOP_PAID_FEED,
        }
    }
}

impl fmt::Display for ChartCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top-free" | "free" => Ok(ChartCategory::TopFree),
            "top-paid" | "paid" => Ok(ChartCategory::TopPaid),
            other => Err(format!("unknown chart category '{}'", other)),
        }
    }
}

/// One (country, category) chart
///
/// Ordering is country code first, then category declaration order. This is
/// the canonical order in which a scan's charts are reduced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChartKey {
    pub country: String,
    pub category: ChartCategory,
}

impl ChartKey {
    pub fn new(country: impl Into<String>, category: ChartCategory) -> Self {
        Self {
            country: country.into().trim().to_ascii_uppercase(),
            category,
        }
    }
}

impl fmt::Display for ChartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chart:{}:{}", self.country, self.category)
    }
}

/// Application identifier to 1-based rank within one chart snapshot
///
/// Immutable once built. Ranks are positional over entries that carried an
/// identifier, so a non-empty map always holds exactly the ranks `1..=len`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RankMap {
    ranks: HashMap<String, u32>,
}

impl RankMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the ordered feed entries; `None` entries are skipped
    /// without consuming a rank
    pub fn from_ordered<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let mut ranks = HashMap::new();
        let mut next_rank = 1u32;
        for id in entries.into_iter().flatten() {
            let id = id.into();
            if id.is_empty() || ranks.contains_key(&id) {
                continue;
            }
            ranks.insert(id, next_rank);
            next_rank += 1;
        }
        Self { ranks }
    }

    pub fn rank_of(&self, app_id: &str) -> Option<u32> {
        self.ranks.get(app_id).copied()
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// Chart snapshots collected by one scan, keyed in canonical order
#[derive(Debug, Clone, Default)]
pub struct ChartSnapshots {
    charts: BTreeMap<ChartKey, Arc<RankMap>>,
}

impl ChartSnapshots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: ChartKey, chart: Arc<RankMap>) {
        self.charts.insert(key, chart);
    }

    pub fn get(&self, key: &ChartKey) -> Option<&RankMap> {
        self.charts.get(key).map(|chart| chart.as_ref())
    }

    /// Charts in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (&ChartKey, &RankMap)> {
        self.charts.iter().map(|(key, chart)| (key, chart.as_ref()))
    }

    /// Number of charts collected, empty ones included
    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// Number of charts that returned at least one entry
    pub fn responsive_count(&self) -> usize {
        self.charts.values().filter(|chart| !chart.is_empty()).count()
    }
}

impl FromIterator<(ChartKey, RankMap)> for ChartSnapshots {
    fn from_iter<T: IntoIterator<Item = (ChartKey, RankMap)>>(iter: T) -> Self {
        let mut snapshots = Self::new();
        for (key, chart) in iter {
            snapshots.insert(key, Arc::new(chart));
        }
        snapshots
    }
}

/// One chart placement of an application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendingRecord {
    pub country: String,
    pub category: ChartCategory,
    pub rank: u32,
}

/// Every chart placement of one application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerAppTrending {
    pub app_id: String,
    /// Placements, best rank first
    trending_in: Vec<TrendingRecord>,
}

impl PerAppTrending {
    /// Build from placements in processing order; the list is stably sorted
    /// by rank so ties keep their processing order
    pub fn new(app_id: impl Into<String>, mut records: Vec<TrendingRecord>) -> Self {
        records.sort_by_key(|record| record.rank);
        Self {
            app_id: app_id.into(),
            trending_in: records,
        }
    }

    pub fn trending_in(&self) -> &[TrendingRecord] {
        &self.trending_in
    }

    pub fn is_trending(&self) -> bool {
        !self.trending_in.is_empty()
    }

    /// Best placement (head of the sorted list)
    pub fn best(&self) -> Option<&TrendingRecord> {
        self.trending_in.first()
    }

    pub fn best_rank(&self) -> Option<u32> {
        self.best().map(|record| record.rank)
    }

    pub fn best_country(&self) -> Option<&str> {
        self.best().map(|record| record.country.as_str())
    }

    /// Number of distinct countries the application charts in
    pub fn country_count(&self) -> usize {
        let mut countries: Vec<&str> = self
            .trending_in
            .iter()
            .map(|record| record.country.as_str())
            .collect();
        countries.sort_unstable();
        countries.dedup();
        countries.len()
    }
}

/// Best placement among all requested applications in one country
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerCountryTrending {
    pub country_code: String,
    pub country_name: String,
    pub flag: String,
    pub best_rank: u32,
    pub app_id: String,
    pub category: ChartCategory,
}

/// Aggregate result of one scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendingSummary {
    pub has_trending: bool,
    pub total_trending_countries: usize,
    /// Sorted by best rank ascending
    pub countries: Vec<PerCountryTrending>,
    /// Sorted by distinct country count descending
    pub per_app_trending: Vec<PerAppTrending>,
    pub breadth: BreadthPreset,
    /// Size of the resolved country list, responsive or not
    pub countries_scanned: usize,
}

impl TrendingSummary {
    /// Valid summary with no hits
    pub fn empty(breadth: BreadthPreset, countries_scanned: usize) -> Self {
        Self {
            has_trending: false,
            total_trending_countries: 0,
            countries: Vec::new(),
            per_app_trending: Vec::new(),
            breadth,
            countries_scanned,
        }
    }

    /// Trending details for one requested application
    pub fn app(&self, app_id: &str) -> Option<&PerAppTrending> {
        self.per_app_trending
            .iter()
            .find(|trending| trending.app_id == app_id)
    }

    /// Best placement in one country
    pub fn country(&self, code: &str) -> Option<&PerCountryTrending> {
        self.countries
            .iter()
            .find(|country| country.country_code.eq_ignore_ascii_case(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_map_is_positional_and_skips_missing_ids() {
        let chart = RankMap::from_ordered(vec![Some("a"), None, Some("b"), Some("c")]);
        assert_eq!(chart.rank_of("a"), Some(1));
        assert_eq!(chart.rank_of("b"), Some(2));
        assert_eq!(chart.rank_of("c"), Some(3));
        assert_eq!(chart.len(), 3);
    }

    #[test]
    fn test_rank_map_keeps_first_duplicate() {
        let chart = RankMap::from_ordered(vec![Some("a"), Some("a"), Some("b")]);
        assert_eq!(chart.rank_of("a"), Some(1));
        assert_eq!(chart.rank_of("b"), Some(2));
    }

    #[test]
    fn test_chart_key_ordering() {
        let mut keys = vec![
            ChartKey::new("us", ChartCategory::TopPaid),
            ChartKey::new("GB", ChartCategory::TopPaid),
            ChartKey::new("US", ChartCategory::TopFree),
            ChartKey::new("GB", ChartCategory::TopFree),
        ];
        keys.sort();
        let rendered: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "chart:GB:top-free",
                "chart:GB:top-paid",
                "chart:US:top-free",
                "chart:US:top-paid",
            ]
        );
    }

    #[test]
    fn test_per_app_best_is_head_of_sorted_list() {
        let trending = PerAppTrending::new(
            "app1",
            vec![
                TrendingRecord {
                    country: "GB".into(),
                    category: ChartCategory::TopFree,
                    rank: 10,
                },
                TrendingRecord {
                    country: "US".into(),
                    category: ChartCategory::TopFree,
                    rank: 3,
                },
                TrendingRecord {
                    country: "US".into(),
                    category: ChartCategory::TopPaid,
                    rank: 7,
                },
            ],
        );
        assert_eq!(trending.best_rank(), Some(3));
        assert_eq!(trending.best_country(), Some("US"));
        assert_eq!(trending.country_count(), 2);
        let ranks: Vec<u32> = trending.trending_in().iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![3, 7, 10]);

        let idle = PerAppTrending::new("app2", Vec::new());
        assert_eq!(idle.best(), None);
        assert!(!idle.is_trending());
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&ChartCategory::TopPaid).unwrap();
        assert_eq!(json, "\"top-paid\"");
        assert_eq!("free".parse::<ChartCategory>().unwrap(), ChartCategory::TopFree);
    }

    #[test]
    fn test_snapshots_count_responsive_charts() {
        let snapshots: ChartSnapshots = vec![
            (
                ChartKey::new("US", ChartCategory::TopFree),
                RankMap::from_ordered(vec![Some("a")]),
            ),
            (ChartKey::new("GB", ChartCategory::TopFree), RankMap::new()),
        ]
        .into_iter()
        .collect();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots.responsive_count(), 1);
    }
}
