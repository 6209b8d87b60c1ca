//! Display strings for trending summaries
//!
//! Every function here is pure. A summary whose fields disagree with each
//! other (for example `has_trending` set with no countries) produces an
//! empty string rather than a panic.

use crate::app::models::{ChartCategory, PerAppTrending, TrendingSummary};

/// Countries named before collapsing into "and N more"
const MAX_NAMED_COUNTRIES: usize = 3;

/// Human label for a chart category
pub fn format_chart_category(category: ChartCategory) -> &'static str {
    match category {
        ChartCategory::TopFree => "Top Free",
        ChartCategory::TopPaid => "Top Paid",
    }
}

/// "country" or "countries"
pub fn country_label(count: usize) -> &'static str {
    if count == 1 {
        "country"
    } else {
        "countries"
    }
}

/// Rank as shown next to a chart name
pub fn rank_badge(rank: u32) -> String {
    format!("#{}", rank)
}

fn is_consistent(summary: &TrendingSummary) -> bool {
    summary.has_trending == !summary.countries.is_empty()
        && summary.total_trending_countries == summary.countries.len()
}

/// Headline such as "Trending in Japan, Germany and 4 more"
pub fn trending_description(summary: &TrendingSummary) -> String {
    if !summary.has_trending || !is_consistent(summary) {
        return String::new();
    }

    if let [only] = summary.countries.as_slice() {
        return format!(
            "Trending in {} ({} {})",
            only.country_name,
            format_chart_category(only.category),
            rank_badge(only.best_rank)
        );
    }

    let named: Vec<&str> = summary
        .countries
        .iter()
        .take(MAX_NAMED_COUNTRIES)
        .map(|country| country.country_name.as_str())
        .collect();
    let list = named.join(", ");
    let remaining = summary
        .total_trending_countries
        .saturating_sub(MAX_NAMED_COUNTRIES);

    if remaining > 0 {
        format!("Trending in {} and {} more", list, remaining)
    } else {
        format!("Trending in {}", list)
    }
}

/// Scan headline, e.g. "trending in 3 countries (of 20 scanned)"
pub fn scan_headline(summary: &TrendingSummary) -> String {
    if !is_consistent(summary) || summary.total_trending_countries > summary.countries_scanned {
        return String::new();
    }

    if !summary.has_trending {
        return format!(
            "not trending in any of {} {} scanned",
            summary.countries_scanned,
            country_label(summary.countries_scanned)
        );
    }

    format!(
        "trending in {} {} (of {} scanned)",
        summary.total_trending_countries,
        country_label(summary.total_trending_countries),
        summary.countries_scanned
    )
}

/// One line per application, e.g. "389801252: 4 countries, best #2 in US (Top Free)"
pub fn app_line(app: &PerAppTrending) -> String {
    let Some(best) = app.best() else {
        return format!("{}: not trending", app.app_id);
    };

    let countries = app.country_count();
    format!(
        "{}: {} {}, best {} in {} ({})",
        app.app_id,
        countries,
        country_label(countries),
        rank_badge(best.rank),
        best.country,
        format_chart_category(best.category)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::countries::BreadthPreset;
    use crate::app::models::{PerCountryTrending, TrendingRecord};

    fn country(code: &str, name: &str, rank: u32) -> PerCountryTrending {
        PerCountryTrending {
            country_code: code.to_string(),
            country_name: name.to_string(),
            flag: String::new(),
            best_rank: rank,
            app_id: "1".to_string(),
            category: ChartCategory::TopFree,
        }
    }

    fn summary(countries: Vec<PerCountryTrending>, scanned: usize) -> TrendingSummary {
        TrendingSummary {
            has_trending: !countries.is_empty(),
            total_trending_countries: countries.len(),
            countries,
            per_app_trending: Vec::new(),
            breadth: BreadthPreset::Major,
            countries_scanned: scanned,
        }
    }

    #[test]
    fn test_single_country_description() {
        let summary = summary(vec![country("JP", "Japan", 7)], 20);
        assert_eq!(trending_description(&summary), "Trending in Japan (Top Free #7)");
        assert_eq!(scan_headline(&summary), "trending in 1 country (of 20 scanned)");
    }

    #[test]
    fn test_multi_country_description() {
        let three = summary(
            vec![
                country("JP", "Japan", 1),
                country("DE", "Germany", 2),
                country("FR", "France", 3),
            ],
            20,
        );
        assert_eq!(
            trending_description(&three),
            "Trending in Japan, Germany, France"
        );
        assert_eq!(scan_headline(&three), "trending in 3 countries (of 20 scanned)");

        let five = summary(
            vec![
                country("JP", "Japan", 1),
                country("DE", "Germany", 2),
                country("FR", "France", 3),
                country("IT", "Italy", 4),
                country("ES", "Spain", 5),
            ],
            20,
        );
        assert_eq!(
            trending_description(&five),
            "Trending in Japan, Germany, France and 2 more"
        );
    }

    #[test]
    fn test_no_hits() {
        let empty = summary(Vec::new(), 5);
        assert_eq!(trending_description(&empty), "");
        assert_eq!(scan_headline(&empty), "not trending in any of 5 countries scanned");
    }

    #[test]
    fn test_inconsistent_summary_yields_empty_string() {
        let mut broken = summary(vec![country("JP", "Japan", 1)], 5);
        broken.total_trending_countries = 4;
        assert_eq!(trending_description(&broken), "");
        assert_eq!(scan_headline(&broken), "");

        let mut broken = summary(Vec::new(), 5);
        broken.has_trending = true;
        assert_eq!(trending_description(&broken), "");

        let overflow = summary(vec![country("JP", "Japan", 1), country("DE", "Germany", 1)], 1);
        assert_eq!(scan_headline(&overflow), "");
    }

    #[test]
    fn test_app_line() {
        let app = PerAppTrending::new(
            "42",
            vec![
                TrendingRecord {
                    country: "GB".to_string(),
                    category: ChartCategory::TopPaid,
                    rank: 9,
                },
                TrendingRecord {
                    country: "US".to_string(),
                    category: ChartCategory::TopFree,
                    rank: 2,
                },
            ],
        );
        assert_eq!(app_line(&app), "42: 2 countries, best #2 in US (Top Free)");
        assert_eq!(app_line(&PerAppTrending::new("7", Vec::new())), "7: not trending");
    }

    #[test]
    fn test_small_helpers() {
        assert_eq!(format_chart_category(ChartCategory::TopPaid), "Top Paid");
        assert_eq!(country_label(0), "countries");
        assert_eq!(rank_badge(12), "#12");
    }
}
