//! Scan progress display
//!
//! Consumes [`ScanProgress`] events from the engine and renders them with an
//! indicatif bar when stderr is a terminal. Without a terminal (or with bars
//! disabled) it falls back to a line on stderr at every quarter of the scan.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::app::scheduler::{ProgressSender, ScanProgress};
use crate::constants::progress::TICK_MS;

/// Configuration for progress display
#[derive(Debug, Clone)]
pub struct ProgressConfig {
    /// Enable visual progress bars
    pub enable_progress_bars: bool,
    /// Print text milestones when bars are unavailable
    pub text_fallback: bool,
    /// Label shown in front of the bar
    pub label: String,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            enable_progress_bars: true,
            text_fallback: true,
            label: "Scanning".to_string(),
        }
    }
}

impl ProgressConfig {
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// What the display saw by the time the scan finished
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressTally {
    pub completed: usize,
    pub total: usize,
    pub with_data: usize,
}

/// Background progress renderer
pub struct ProgressDisplay {
    handle: JoinHandle<ProgressTally>,
}

impl ProgressDisplay {
    /// Start rendering; events are fed through the returned sender
    pub fn start(config: ProgressConfig) -> (Self, ProgressSender) {
        let (tx, rx) = mpsc::unbounded_channel();
        let is_terminal = atty::is(atty::Stream::Stderr);

        let bar = if config.enable_progress_bars && is_terminal {
            Some(Self::create_bar(&config.label))
        } else {
            None
        };
        let text_mode = bar.is_none() && config.text_fallback && config.enable_progress_bars;

        let handle = tokio::spawn(Self::run(rx, bar, text_mode, config.label));
        (Self { handle }, tx)
    }

    fn create_bar(label: &str) -> ProgressBar {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{spinner:.green} {prefix} [{bar:40.cyan/blue}] {pos}/{len} charts ({eta}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
        bar.set_style(style);
        bar.set_prefix(label.to_string());
        bar.enable_steady_tick(Duration::from_millis(TICK_MS));
        bar
    }

    async fn run(
        mut rx: mpsc::UnboundedReceiver<ScanProgress>,
        bar: Option<ProgressBar>,
        text_mode: bool,
        label: String,
    ) -> ProgressTally {
        let mut tally = ProgressTally::default();
        let mut next_milestone = 25.0;

        while let Some(event) = rx.recv().await {
            tally.completed = event.completed;
            tally.total = event.total;
            if event.is_hit() {
                tally.with_data += 1;
            }

            if let Some(bar) = &bar {
                bar.set_length(event.total as u64);
                bar.set_position(event.completed as u64);
                bar.set_message(format!("{} with data", tally.with_data));
            } else if text_mode && event.percent() >= next_milestone {
                eprintln!(
                    "{}: {}/{} charts ({:.0}%)",
                    label,
                    event.completed,
                    event.total,
                    event.percent()
                );
                while next_milestone <= event.percent() {
                    next_milestone += 25.0;
                }
            }
        }

        if let Some(bar) = bar {
            bar.finish_and_clear();
        }
        debug!(
            "Progress display finished: {}/{} charts, {} with data",
            tally.completed, tally.total, tally.with_data
        );
        tally
    }

    /// Wait for the display to drain; every sender must be dropped first
    pub async fn finish(self) -> ProgressTally {
        self.handle.await.unwrap_or_default()
    }
}
