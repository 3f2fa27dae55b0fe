//! Address-to-country resolution.
//!
//! The backend precedence chain is explicit: an ordered list of
//! [`CountryBackend`] implementations (local GeoLite2 database, then the
//! remote lookup API), each answering with a label or absence. The first
//! `Some` wins. Backend errors are logged and treated as absence from that
//! backend, never propagated; the persistent cache sits in front of the
//! whole chain and records every outcome, including absence.

mod cache;
mod country;
mod geoip;
mod remote;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{debug, info};

pub use cache::CountryCache;
pub use country::display_label;
pub use geoip::GeoDbBackend;
pub use remote::IpinfoBackend;

use crate::error_handling::{ResolveError, RunStats};
use crate::initialization::init_semaphore;

/// A single country-lookup backend.
///
/// The contract is lookup-or-absence: `Ok(None)` means "this backend has no
/// answer for this address," and errors mean the backend misbehaved. The
/// chain treats both the same way and moves on.
#[async_trait]
pub trait CountryBackend: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Whether a call hits the remote lookup API (counted against its
    /// informal rate limit).
    fn is_remote(&self) -> bool {
        false
    }

    /// Resolves an address to a display label.
    async fn lookup(&self, address: &str) -> Result<Option<String>, ResolveError>;
}

/// Runs one address through the backend chain.
async fn lookup_chain(
    backends: &[Box<dyn CountryBackend>],
    stats: &RunStats,
    address: &str,
) -> Option<String> {
    for backend in backends {
        if backend.is_remote() {
            stats.record_remote_lookup();
        }
        match backend.lookup(address).await {
            Ok(Some(label)) => return Some(label),
            Ok(None) => continue,
            Err(err) => {
                debug!("{} lookup failed for {address}: {err}", backend.name());
                continue;
            }
        }
    }
    None
}

/// Resolves addresses through the cache and the backend chain.
pub struct Resolver {
    backends: Vec<Box<dyn CountryBackend>>,
    cache: CountryCache,
    stats: Arc<RunStats>,
}

impl Resolver {
    /// Creates a resolver over an ordered backend chain.
    pub fn new(
        backends: Vec<Box<dyn CountryBackend>>,
        cache: CountryCache,
        stats: Arc<RunStats>,
    ) -> Self {
        Self {
            backends,
            cache,
            stats,
        }
    }

    /// Resolves every address, returning the label (or absence) for each.
    ///
    /// With `concurrency <= 1` the loop is fully sequential. Above that,
    /// uncached addresses go through a semaphore-bounded worker pool whose
    /// results are folded into the cache as they complete; output ordering
    /// is unaffected because the caller annotates in canonical address
    /// order, not completion order.
    pub async fn resolve_all(
        &mut self,
        addresses: &[String],
        concurrency: usize,
    ) -> HashMap<String, Option<String>> {
        let mut results: HashMap<String, Option<String>> = HashMap::new();
        let mut uncached: Vec<String> = Vec::new();

        for address in addresses {
            if let Some(cached) = self.cache.get(address) {
                self.stats.record_cache_hit();
                debug!("{address} => cache hit");
                results.insert(address.clone(), cached.clone());
            } else {
                uncached.push(address.clone());
            }
        }

        if concurrency <= 1 {
            for address in uncached {
                let label = lookup_chain(&self.backends, &self.stats, &address).await;
                log_outcome(&address, label.as_deref());
                self.cache.insert(address.clone(), label.clone());
                results.insert(address, label);
            }
        } else {
            let semaphore = init_semaphore(concurrency);
            let backends = &self.backends;
            let stats = self.stats.as_ref();

            let mut pending = FuturesUnordered::new();
            for address in uncached {
                let semaphore = Arc::clone(&semaphore);
                pending.push(async move {
                    let _permit = semaphore.acquire_owned().await.ok();
                    let label = lookup_chain(backends, stats, &address).await;
                    (address, label)
                });
            }

            // Single consumer: the cache map is only ever touched here,
            // after each worker result is collected.
            while let Some((address, label)) = pending.next().await {
                log_outcome(&address, label.as_deref());
                self.cache.insert(address.clone(), label.clone());
                results.insert(address, label);
            }
        }

        results
    }

    /// Hands the (updated) cache back for persistence.
    pub fn into_cache(self) -> CountryCache {
        self.cache
    }
}

fn log_outcome(address: &str, label: Option<&str>) {
    match label {
        Some(label) => info!("{address} => {label}"),
        None => info!("{address} => (no country)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted backend for chain-order tests.
    struct FixedBackend {
        answers: HashMap<String, String>,
        calls: AtomicUsize,
        remote: bool,
    }

    impl FixedBackend {
        fn new(answers: &[(&str, &str)], remote: bool) -> Self {
            Self {
                answers: answers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                calls: AtomicUsize::new(0),
                remote,
            }
        }
    }

    #[async_trait]
    impl CountryBackend for FixedBackend {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn is_remote(&self) -> bool {
            self.remote
        }

        async fn lookup(&self, address: &str) -> Result<Option<String>, ResolveError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.answers.get(address).cloned())
        }
    }

    fn temp_cache() -> CountryCache {
        let dir = tempfile::TempDir::new().unwrap();
        CountryCache::load(&dir.path().join("cache.json"))
    }

    #[tokio::test]
    async fn test_first_backend_wins() {
        let first = Box::new(FixedBackend::new(&[("1.1.1.1", "美国")], false));
        let second = Box::new(FixedBackend::new(&[("1.1.1.1", "日本")], false));
        let mut resolver = Resolver::new(
            vec![first, second],
            temp_cache(),
            Arc::new(RunStats::default()),
        );

        let results = resolver.resolve_all(&["1.1.1.1".to_string()], 1).await;
        assert_eq!(results["1.1.1.1"], Some("美国".to_string()));
    }

    #[tokio::test]
    async fn test_fallthrough_to_second_backend() {
        let first = Box::new(FixedBackend::new(&[], false));
        let second = Box::new(FixedBackend::new(&[("1.1.1.1", "日本")], false));
        let mut resolver = Resolver::new(
            vec![first, second],
            temp_cache(),
            Arc::new(RunStats::default()),
        );

        let results = resolver.resolve_all(&["1.1.1.1".to_string()], 1).await;
        assert_eq!(results["1.1.1.1"], Some("日本".to_string()));
    }

    #[tokio::test]
    async fn test_cached_absence_short_circuits_backends() {
        let backend = Box::new(FixedBackend::new(&[("2.2.2.2", "美国")], false));
        let stats = Arc::new(RunStats::default());
        let mut cache = temp_cache();
        cache.insert("2.2.2.2".into(), None);

        let mut resolver = Resolver::new(vec![backend], cache, Arc::clone(&stats));
        let results = resolver.resolve_all(&["2.2.2.2".to_string()], 1).await;

        // The cached null wins; the backend is never consulted.
        assert_eq!(results["2.2.2.2"], None);
        assert_eq!(stats.cache_hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_absence_recorded_in_cache() {
        let backend = Box::new(FixedBackend::new(&[], false));
        let mut resolver = Resolver::new(
            vec![backend],
            temp_cache(),
            Arc::new(RunStats::default()),
        );

        resolver.resolve_all(&["3.3.3.3".to_string()], 1).await;
        let cache = resolver.into_cache();
        assert_eq!(cache.get("3.3.3.3"), Some(&None));
    }

    #[tokio::test]
    async fn test_pooled_resolution_matches_sequential() {
        let addresses: Vec<String> = (1..=20).map(|i| format!("10.0.0.{i}")).collect();
        let answers: Vec<(String, String)> = addresses
            .iter()
            .enumerate()
            .map(|(i, ip)| (ip.clone(), if i % 2 == 0 { "美国" } else { "日本" }.to_string()))
            .collect();
        let answer_refs: Vec<(&str, &str)> = answers
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        let mut sequential = Resolver::new(
            vec![Box::new(FixedBackend::new(&answer_refs, false))],
            temp_cache(),
            Arc::new(RunStats::default()),
        );
        let mut pooled = Resolver::new(
            vec![Box::new(FixedBackend::new(&answer_refs, false))],
            temp_cache(),
            Arc::new(RunStats::default()),
        );

        let a = sequential.resolve_all(&addresses, 1).await;
        let b = pooled.resolve_all(&addresses, 4).await;
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_remote_calls_counted() {
        let backend = Box::new(FixedBackend::new(&[("1.1.1.1", "美国")], true));
        let stats = Arc::new(RunStats::default());
        let mut resolver = Resolver::new(vec![backend], temp_cache(), Arc::clone(&stats));

        resolver
            .resolve_all(&["1.1.1.1".to_string(), "2.2.2.2".to_string()], 1)
            .await;
        assert_eq!(stats.remote_lookups.load(Ordering::SeqCst), 2);
    }
}
