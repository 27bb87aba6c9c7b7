//! Logging setup and parse counters

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber, filtered by `RUST_LOG` (default `info`)
///
/// Logs go to stderr so `parsebox parse` can print clean JSON on stdout.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Counters for the HTTP host
#[derive(Debug, Default)]
pub struct Metrics {
    parsed: AtomicU64,
    parse_failed: AtomicU64,
    unsupported: AtomicU64,
    reprioritized: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parsed(&self) {
        self.parsed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "parsed", "Metric incremented");
    }

    pub fn parse_failed(&self) {
        self.parse_failed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "parse_failed", "Metric incremented");
    }

    pub fn unsupported(&self) {
        self.unsupported.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "unsupported", "Metric incremented");
    }

    pub fn reprioritized(&self) {
        self.reprioritized.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "reprioritized", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            parsed: self.parsed.load(Ordering::Relaxed),
            parse_failed: self.parse_failed.load(Ordering::Relaxed),
            unsupported: self.unsupported.load(Ordering::Relaxed),
            reprioritized: self.reprioritized.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub parsed: u64,
    pub parse_failed: u64,
    pub unsupported: u64,
    pub reprioritized: u64,
}
