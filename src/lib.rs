//! Storefront Trends Library
//!
//! Scans App Store top charts across many storefronts concurrently and
//! reduces them into a trending summary for a portfolio of apps. Fetches are
//! batched, rate limited and memoized for the lifetime of the process.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
