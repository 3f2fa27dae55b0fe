//! Run-level counters.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters accumulated over one pipeline run.
///
/// All fields are atomics so the worker-pool resolver variant can record
/// outcomes without additional locking.
#[derive(Debug, Default)]
pub struct RunStats {
    /// Source pages fetched successfully.
    pub pages_fetched: AtomicUsize,
    /// Source pages skipped after exhausting retry policy.
    pub pages_failed: AtomicUsize,
    /// Addresses answered from the persistent cache.
    pub cache_hits: AtomicUsize,
    /// Calls made to the remote lookup API.
    pub remote_lookups: AtomicUsize,
}

impl RunStats {
    /// Records a successfully fetched source page.
    pub fn record_page_fetched(&self) {
        self.pages_fetched.fetch_add(1, Ordering::SeqCst);
    }

    /// Records a source page given up on.
    pub fn record_page_failed(&self) {
        self.pages_failed.fetch_add(1, Ordering::SeqCst);
    }

    /// Records a cache hit (no backend consulted).
    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::SeqCst);
    }

    /// Records one call to the remote lookup API.
    pub fn record_remote_lookup(&self) {
        self.remote_lookups.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let stats = RunStats::default();
        stats.record_page_fetched();
        stats.record_page_fetched();
        stats.record_page_failed();
        stats.record_cache_hit();
        stats.record_remote_lookup();
        assert_eq!(stats.pages_fetched.load(Ordering::SeqCst), 2);
        assert_eq!(stats.pages_failed.load(Ordering::SeqCst), 1);
        assert_eq!(stats.cache_hits.load(Ordering::SeqCst), 1);
        assert_eq!(stats.remote_lookups.load(Ordering::SeqCst), 1);
    }
}
