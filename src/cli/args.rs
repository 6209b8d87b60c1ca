//! Command-line argument parsing for Storefront Trends
//!
//! This module defines the CLI structure using clap derive macros: scanning
//! apps for chart placements, warming the chart cache, and listing the
//! storefront registry.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::countries::{BreadthPreset, Region};
use crate::app::models::ChartCategory;

/// Storefront Trends - find where your apps are charting
#[derive(Parser, Debug)]
#[command(
    name = "storefront_trends",
    version,
    about = "Scan App Store top charts across storefronts for your apps",
    long_about = "Fetches the top free and top paid charts of many App Store storefronts concurrently
and reports, per country and per app, where the given apps are ranked."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan charts for one or more apps
    Scan(ScanArgs),

    /// Fetch every chart of a breadth preset ahead of time
    Prefetch(PrefetchArgs),

    /// List known storefronts
    Countries(CountriesArgs),
}

/// Arguments for the scan command
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// App Store IDs or app links
    #[arg(value_name = "APP_OR_URL", required = true, num_args = 1..)]
    pub apps: Vec<String>,

    /// Scan breadth: quick, major or global
    #[arg(short, long, default_value = "quick")]
    pub breadth: BreadthPreset,

    /// Only scan one chart (free or paid)
    #[arg(long, value_name = "CHART")]
    pub category: Option<ChartCategory>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Arguments for the prefetch command
#[derive(Args, Debug, Clone)]
pub struct PrefetchArgs {
    /// Scan breadth: quick, major or global
    #[arg(short, long, default_value = "quick")]
    pub breadth: BreadthPreset,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Arguments for the countries command
#[derive(Args, Debug, Clone)]
pub struct CountriesArgs {
    /// Only list the storefronts of a breadth preset
    #[arg(short, long)]
    pub breadth: Option<BreadthPreset>,

    /// Only list one region (americas, europe, asia-pacific, middle-east-africa)
    #[arg(short, long)]
    pub region: Option<Region>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the logging level from the flags, or the configured level when
    /// no flag is given
    pub fn log_level(&self, configured: &str) -> tracing::Level {
        if self.global.quiet {
            tracing::Level::ERROR
        } else if self.global.very_verbose {
            tracing::Level::DEBUG
        } else if self.global.verbose {
            tracing::Level::INFO
        } else {
            configured.parse().unwrap_or(tracing::Level::WARN)
        }
    }

    /// Whether progress bars may be drawn
    pub fn show_progress(&self) -> bool {
        let disabled = match &self.command {
            Commands::Scan(args) => args.no_progress || args.json,
            Commands::Prefetch(args) => args.no_progress,
            Commands::Countries(_) => true,
        };
        !disabled && !self.global.quiet
    }
}

impl ScanArgs {
    /// Chart categories to scan
    pub fn categories(&self) -> Vec<ChartCategory> {
        match self.category {
            Some(category) => vec![category],
            None => ChartCategory::ALL.to_vec(),
        }
    }
}
