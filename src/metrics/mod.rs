//! Metrics collection module
//!
//! Counts what the query pipeline did with each emission and fetch.

use std::sync::atomic::{AtomicU64, Ordering};

/// Pipeline counters
#[derive(Debug, Default)]
pub struct PipelineMetrics {
    emissions: AtomicU64,
    duplicates: AtomicU64,
    debounced: AtomicU64,
    invalid_urls: AtomicU64,
    fetches: AtomicU64,
    superseded: AtomicU64,
    published: AtomicU64,
}

impl PipelineMetrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a query text value observed from the source
    pub fn record_emission(&self) {
        self.emissions.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a value equal to its predecessor
    pub fn record_duplicate(&self) {
        self.duplicates.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a pending value discarded because another arrived in time
    pub fn record_debounced(&self) {
        self.debounced.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a value dropped because its URL could not be built
    pub fn record_invalid_url(&self) {
        self.invalid_urls.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a dispatched fetch
    pub fn record_fetch(&self) {
        self.fetches.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a fetch result discarded as stale
    pub fn record_superseded(&self) {
        self.superseded.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a result list applied to the published state
    pub fn record_published(&self) {
        self.published.fetch_add(1, Ordering::Relaxed);
    }

    pub fn emissions(&self) -> u64 {
        self.emissions.load(Ordering::Relaxed)
    }

    pub fn duplicates(&self) -> u64 {
        self.duplicates.load(Ordering::Relaxed)
    }

    pub fn debounced(&self) -> u64 {
        self.debounced.load(Ordering::Relaxed)
    }

    pub fn invalid_urls(&self) -> u64 {
        self.invalid_urls.load(Ordering::Relaxed)
    }

    pub fn fetches(&self) -> u64 {
        self.fetches.load(Ordering::Relaxed)
    }

    pub fn superseded(&self) -> u64 {
        self.superseded.load(Ordering::Relaxed)
    }

    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }

    /// Fetches that have neither been published nor discarded yet
    pub fn unresolved_fetches(&self) -> u64 {
        self.fetches().saturating_sub(self.published() + self.superseded())
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            emissions: self.emissions(),
            duplicates: self.duplicates(),
            debounced: self.debounced(),
            invalid_urls: self.invalid_urls(),
            fetches: self.fetches(),
            superseded: self.superseded(),
            published: self.published(),
        }
    }
}

/// Counter values at one point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub emissions: u64,
    pub duplicates: u64,
    pub debounced: u64,
    pub invalid_urls: u64,
    pub fetches: u64,
    pub superseded: u64,
    pub published: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics() {
        let metrics = PipelineMetrics::new();

        metrics.record_emission();
        metrics.record_emission();
        metrics.record_duplicate();
        metrics.record_fetch();
        metrics.record_published();

        assert_eq!(
            metrics.snapshot(),
            MetricsSnapshot {
                emissions: 2,
                duplicates: 1,
                fetches: 1,
                published: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_unresolved_fetches() {
        let metrics = PipelineMetrics::new();
        assert_eq!(metrics.unresolved_fetches(), 0);

        metrics.record_fetch();
        metrics.record_fetch();
        metrics.record_fetch();
        assert_eq!(metrics.unresolved_fetches(), 3);

        metrics.record_superseded();
        metrics.record_published();
        assert_eq!(metrics.unresolved_fetches(), 1);

        metrics.record_published();
        assert_eq!(metrics.unresolved_fetches(), 0);
    }
}
