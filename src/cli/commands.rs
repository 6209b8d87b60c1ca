//! Command handlers for Storefront Trends CLI
//!
//! This module implements the command handlers that wire CLI arguments and
//! configuration to the trending engine, and render its results.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::app::app_id::parse_app_id;
use crate::app::cache::ChartCache;
use crate::app::client::ChartClient;
use crate::app::countries::{self, BreadthPreset, Country};
use crate::app::engine::{ScanReport, TrendingEngine};
use crate::app::format::{app_line, format_chart_category, rank_badge, scan_headline, trending_description};
use crate::app::models::{ChartCategory, TrendingSummary};
use crate::cli::{CountriesArgs, PrefetchArgs, ProgressConfig, ProgressDisplay, ScanArgs};
use crate::config::AppConfig;
use crate::errors::{AppError, Result};

/// Engine plus the cache and sweeper backing it for one command run
struct ScanContext {
    engine: TrendingEngine,
    cache: ChartCache,
    shutdown_tx: broadcast::Sender<()>,
    sweeper: Option<JoinHandle<()>>,
}

impl ScanContext {
    fn build(config: &AppConfig, categories: &[ChartCategory]) -> Result<Self> {
        let runtime = config.to_runtime_config();
        let cache = ChartCache::new();
        let client = ChartClient::with_config(runtime.client, cache.clone(), &runtime.cache)?;
        let engine =
            TrendingEngine::new(Arc::new(client), runtime.scheduler).with_categories(categories);

        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let sweeper = runtime
            .cache
            .sweep_enabled
            .then(|| cache.spawn_sweeper(runtime.cache.sweep_interval, shutdown_rx));

        Ok(Self {
            engine,
            cache,
            shutdown_tx,
            sweeper,
        })
    }

    async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        if let Some(sweeper) = self.sweeper {
            if let Err(e) = sweeper.await {
                debug!("Cache sweeper ended abnormally: {}", e);
            }
        }
    }
}

/// Parse every app argument, failing on the first bad one
pub fn parse_app_ids(inputs: &[String]) -> Result<Vec<String>> {
    inputs
        .iter()
        .map(|input| parse_app_id(input).map_err(AppError::from))
        .collect()
}

/// Handle the scan command
pub async fn handle_scan(args: ScanArgs, config: &AppConfig, show_progress: bool) -> Result<()> {
    let app_ids = parse_app_ids(&args.apps)?;
    info!(
        "Scanning {} apps with {} breadth",
        app_ids.len(),
        args.breadth
    );

    let context = ScanContext::build(config, &args.categories())?;

    let report = if show_progress {
        let (display, tx) =
            ProgressDisplay::start(ProgressConfig::default().with_label("Scanning"));
        let report = context.engine.scan(&app_ids, args.breadth, Some(&tx)).await;
        drop(tx);
        display.finish().await;
        report
    } else {
        context.engine.scan(&app_ids, args.breadth, None).await
    };

    let rendered = render_report(&report, args.json);
    context.shutdown().await;

    println!("{}", rendered?);
    Ok(())
}

/// Handle the prefetch command
pub async fn handle_prefetch(args: PrefetchArgs, config: &AppConfig, show_progress: bool) -> Result<()> {
    let context = ScanContext::build(config, &ChartCategory::ALL)?;

    let report = if show_progress {
        let (display, tx) =
            ProgressDisplay::start(ProgressConfig::default().with_label("Prefetching"));
        let report = context.engine.prefetch(args.breadth, Some(&tx)).await;
        drop(tx);
        display.finish().await;
        report
    } else {
        context.engine.prefetch(args.breadth, None).await
    };

    let stats = context.cache.stats().await;
    println!(
        "Prefetched {} charts for {} breadth in {:.1}s",
        report.charts_fetched,
        report.breadth,
        report.elapsed.as_secs_f64()
    );
    println!("  Charts with data: {}", report.charts_with_data);
    println!(
        "  Cache: {} live entries, {} misses, {} hits ({:.0}% hit rate)",
        stats.live_entries,
        stats.misses,
        stats.hits,
        stats.hit_rate()
    );

    context.shutdown().await;
    Ok(())
}

/// Handle the countries command
pub async fn handle_countries(args: CountriesArgs) -> Result<()> {
    let listed = select_countries(&args);

    for line in render_country_list(&listed) {
        println!("{}", line);
    }
    println!();
    println!(
        "{} of {} storefronts",
        listed.len(),
        countries::catalog_size()
    );
    Ok(())
}

fn select_countries(args: &CountriesArgs) -> Vec<Country> {
    let base = match args.breadth {
        Some(preset) => countries::resolve_breadth(preset),
        None => countries::resolve_breadth(BreadthPreset::Global),
    };

    match args.region {
        Some(region) => base
            .into_iter()
            .filter(|country| country.region == region)
            .collect(),
        None => base,
    }
}

fn render_country_list(listed: &[Country]) -> Vec<String> {
    listed
        .iter()
        .map(|country| {
            format!(
                "{} {}  {:<32} {}",
                country.flag, country.code, country.name, country.region
            )
        })
        .collect()
}

/// Lines of the per-country table
pub fn render_country_table(summary: &TrendingSummary) -> Vec<String> {
    summary
        .countries
        .iter()
        .map(|country| {
            format!(
                "  {} {}  {:<24} {:>5}  {:<8}  app {}",
                country.flag,
                country.country_code,
                country.country_name,
                rank_badge(country.best_rank),
                format_chart_category(country.category),
                country.app_id
            )
        })
        .collect()
}

/// Render a scan report as pretty JSON or as the text report
pub fn render_report(report: &ScanReport, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(report)
            .map_err(|e| AppError::generic(format!("Failed to encode summary: {}", e)));
    }

    let summary = &report.summary;
    let mut lines = vec![format!("📈 {}", scan_headline(summary))];
    let description = trending_description(summary);
    if !description.is_empty() {
        lines.push(format!("   {}", description));
    }

    if summary.has_trending {
        lines.push(String::new());
        lines.extend(render_country_table(summary));
    }

    if !summary.per_app_trending.is_empty() {
        lines.push(String::new());
        lines.push("Apps:".to_string());
        lines.extend(
            summary
                .per_app_trending
                .iter()
                .map(|app| format!("  {}", app_line(app))),
        );
    }

    lines.push(String::new());
    lines.push(format!(
        "Scanned {} charts ({} with data) in {:.1}s, started {}",
        report.charts_fetched,
        report.charts_with_data,
        report.elapsed.as_secs_f64(),
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    Ok(lines.join("\n"))
}
