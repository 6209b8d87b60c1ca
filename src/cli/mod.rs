//! Command-line interface components
//!
//! This module contains CLI-specific code for the Storefront Trends
//! application, including argument parsing, command handlers and progress
//! display.

pub mod args;
pub mod commands;
pub mod progress;

pub use args::{Cli, Commands, CountriesArgs, GlobalArgs, PrefetchArgs, ScanArgs};
pub use commands::{handle_countries, handle_prefetch, handle_scan};
pub use progress::{ProgressConfig, ProgressDisplay, ProgressTally};
