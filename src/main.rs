//! Storefront Trends CLI application
//!
//! Command-line interface for scanning App Store charts across storefronts
//! and reporting where a set of apps is trending.

use std::process;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

// Import CLI modules through the library (module is public but not re-exported)
use storefront_trends::cli::{handle_countries, handle_prefetch, handle_scan, Cli, Commands};
use storefront_trends::config::AppConfig;
use storefront_trends::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();
    let config = AppConfig::load(cli.global.config.clone()).await?;

    init_logging(&cli, &config);

    info!("Storefront Trends v{} starting", env!("CARGO_PKG_VERSION"));

    let show_progress = cli.show_progress();
    match cli.command {
        Commands::Scan(args) => {
            info!("Executing scan command");
            handle_scan(args, &config, show_progress).await
        }
        Commands::Prefetch(args) => {
            info!("Executing prefetch command");
            handle_prefetch(args, &config, show_progress).await
        }
        Commands::Countries(args) => {
            info!("Executing countries command");
            handle_countries(args).await
        }
    }
}

/// Initialize logging from CLI verbosity flags, falling back to the config
fn init_logging(cli: &Cli, config: &AppConfig) {
    let log_level = cli.log_level(&config.logging.level);

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("storefront_trends={}", log_level).parse() {
        filter = filter.add_directive(directive);
    }

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(cli.global.very_verbose)
        .with_writer(std::io::stderr)
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
}
