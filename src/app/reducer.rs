//! Trending reduction
//!
//! Folds a scan's chart snapshots into the per-application and per-country
//! views. Charts are visited in [`ChartSnapshots`] order (country code, then
//! category) and applications in requested order, so the result depends only
//! on the snapshot contents and never on the order fetches completed.
//!
//! Tie rules:
//! - per-country best: the first placement seen keeps the slot on an exact tie
//! - per-country list: ascending best rank, ties by country code
//! - per-app placements: ascending rank, ties in processing order
//! - per-app list: descending distinct country count, ties in requested order

use std::cmp::Reverse;
use std::collections::HashMap;

use tracing::debug;

use crate::app::countries::{self, BreadthPreset};
use crate::app::models::{
    ChartCategory, ChartSnapshots, PerAppTrending, PerCountryTrending, TrendingRecord,
    TrendingSummary,
};

/// Output of [`reduce`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reduction {
    pub per_app: Vec<PerAppTrending>,
    pub per_country: Vec<PerCountryTrending>,
}

impl Reduction {
    /// Wrap the views into a summary for a scan of `countries_scanned` countries
    pub fn into_summary(self, breadth: BreadthPreset, countries_scanned: usize) -> TrendingSummary {
        TrendingSummary {
            has_trending: !self.per_country.is_empty(),
            total_trending_countries: self.per_country.len(),
            countries: self.per_country,
            per_app_trending: self.per_app,
            breadth,
            countries_scanned,
        }
    }
}

#[derive(Clone, Copy)]
struct CountryBest<'a> {
    rank: u32,
    app_id: &'a str,
    category: ChartCategory,
}

/// Requested IDs, trimmed, without blanks or repeats, first occurrence kept
pub fn normalize_app_ids<S: AsRef<str>>(app_ids: &[S]) -> Vec<String> {
    let mut seen = Vec::with_capacity(app_ids.len());
    for id in app_ids {
        let id = id.as_ref().trim();
        if !id.is_empty() && !seen.iter().any(|existing: &String| existing == id) {
            seen.push(id.to_string());
        }
    }
    seen
}

/// Reduce chart snapshots for the requested applications
pub fn reduce<S: AsRef<str>>(app_ids: &[S], snapshots: &ChartSnapshots) -> Reduction {
    let app_ids = normalize_app_ids(app_ids);
    if app_ids.is_empty() {
        return Reduction::default();
    }

    let mut records: Vec<Vec<TrendingRecord>> = vec![Vec::new(); app_ids.len()];
    let mut best: HashMap<&str, CountryBest<'_>> = HashMap::new();

    for (key, chart) in snapshots.iter() {
        if chart.is_empty() {
            continue;
        }

        for (position, app_id) in app_ids.iter().enumerate() {
            let Some(rank) = chart.rank_of(app_id) else {
                continue;
            };

            records[position].push(TrendingRecord {
                country: key.country.clone(),
                category: key.category,
                rank,
            });

            let candidate = CountryBest {
                rank,
                app_id,
                category: key.category,
            };
            let current = best.entry(key.country.as_str()).or_insert(candidate);
            if rank < current.rank {
                *current = candidate;
            }
        }
    }

    let mut per_app: Vec<PerAppTrending> = app_ids
        .iter()
        .zip(records)
        .map(|(app_id, placements)| PerAppTrending::new(app_id.as_str(), placements))
        .collect();
    per_app.sort_by_key(|app| Reverse(app.country_count()));

    let mut per_country: Vec<PerCountryTrending> = best
        .into_iter()
        .map(|(code, best)| {
            let country = countries::lookup(code);
            PerCountryTrending {
                country_code: code.to_string(),
                country_name: country.name,
                flag: country.flag,
                best_rank: best.rank,
                app_id: best.app_id.to_string(),
                category: best.category,
            }
        })
        .collect();
    per_country.sort_by(|a, b| {
        a.best_rank
            .cmp(&b.best_rank)
            .then_with(|| a.country_code.cmp(&b.country_code))
    });

    debug!(
        "Reduced {} charts for {} apps: {} trending countries",
        snapshots.len(),
        per_app.len(),
        per_country.len()
    );

    Reduction {
        per_app,
        per_country,
    }
}
