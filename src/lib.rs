//! ip_collector library: the edge-node address collection pipeline.
//!
//! Four linear stages, no persistent process:
//!
//! 1. **Fetch** - retrieve page text from a list of source URLs (or one
//!    CIDR-list URL), retrying rate limits and rotating identifying headers
//!    on access-denied responses.
//! 2. **Extract** - regex out every IPv4-shaped token, deduplicate across
//!    sources, and order by numeric octet tuple.
//! 3. **Resolve** - map each address to a country label through a
//!    persistent cache, an optional local GeoLite2 database, and the remote
//!    lookup API, in that order.
//! 4. **Annotate/Write** - number addresses per country (`ip#label001`) and
//!    overwrite the flat output file.
//!
//! # Example
//!
//! ```no_run
//! use ip_collector::{run_pipeline, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     output: std::path::PathBuf::from("ip.txt"),
//!     concurrency: 4,
//!     ..Default::default()
//! };
//!
//! let report = run_pipeline(config).await?;
//! println!("{} addresses, {} resolved", report.total_addresses, report.resolved);
//! # Ok(())
//! # }
//! ```
//!
//! This library requires a Tokio runtime.

#![warn(missing_docs)]

mod annotate;
pub mod config;
mod error_handling;
mod extract;
mod fetch;
pub mod initialization;
mod resolve;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use run::{run_pipeline, PipelineReport};

// Internal run module (contains the pipeline orchestration)
mod run {
    use std::collections::HashSet;
    use std::path::PathBuf;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use anyhow::{Context, Result};
    use log::{debug, info, warn};

    use crate::annotate;
    use crate::config::{Config, DEFAULT_GEOIP_DB, DEFAULT_SOURCES, IPINFO_TOKEN_ENV};
    use crate::error_handling::RunStats;
    use crate::extract;
    use crate::fetch::Fetcher;
    use crate::initialization::init_client;
    use crate::resolve::{CountryBackend, CountryCache, GeoDbBackend, IpinfoBackend, Resolver};

    /// Results of one pipeline run.
    #[derive(Debug, Clone)]
    pub struct PipelineReport {
        /// Unique addresses collected across all sources.
        pub total_addresses: usize,
        /// Addresses that got a country label.
        pub resolved: usize,
        /// Addresses written bare (no backend had an answer).
        pub unresolved: usize,
        /// Addresses answered from the persistent cache.
        pub cache_hits: usize,
        /// Calls made to the remote lookup API.
        pub remote_lookups: usize,
        /// Source pages fetched successfully.
        pub pages_fetched: usize,
        /// Source pages skipped after exhausting retry policy.
        pub pages_failed: usize,
        /// Output file path, or `None` when zero addresses were collected
        /// and the file was left untouched.
        pub output: Option<PathBuf>,
        /// Elapsed time in seconds.
        pub elapsed_seconds: f64,
    }

    /// Runs the full pipeline with the provided configuration.
    ///
    /// Collecting zero addresses is a clean early return (the output file is
    /// not touched), not an error: every individual source is allowed to
    /// fail. Errors are reserved for local faults the run cannot work
    /// around, like an unbuildable HTTP client or an unwritable output file.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed or the
    /// output file cannot be written. The cache is persisted before the
    /// output write, so lookup results survive an output failure; cache
    /// persistence failure itself is logged and swallowed. It costs
    /// re-lookups next run, not correctness.
    pub async fn run_pipeline(config: Config) -> Result<PipelineReport> {
        let start = Instant::now();
        let stats = Arc::new(RunStats::default());

        let client = init_client(&config).context("Failed to initialize HTTP client")?;
        let fetcher = Fetcher::new(client.clone(), config.retry_attempts);

        // Stage 1+2: fetch and extract into one deduplicating set.
        let mut candidates: HashSet<String> = HashSet::new();
        if let Some(cidr_source) = &config.cidr_source {
            info!("CIDR mode: fetching block list from {cidr_source}");
            match fetcher.fetch_page(cidr_source).await {
                Some(text) => {
                    stats.record_page_fetched();
                    extract::expand_cidrs(&text, config.max_expand_prefix, &mut candidates);
                }
                None => stats.record_page_failed(),
            }
        } else {
            let sources: Vec<String> = if config.sources.is_empty() {
                DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect()
            } else {
                config.sources.clone()
            };
            for url in &sources {
                match fetcher.fetch_page(url).await {
                    Some(text) => {
                        stats.record_page_fetched();
                        extract::extract_addresses(&text, &mut candidates);
                    }
                    None => stats.record_page_failed(),
                }
            }
        }

        if config.validate_octets {
            let before = candidates.len();
            candidates.retain(|address| extract::is_valid_quad(address));
            let dropped = before - candidates.len();
            if dropped > 0 {
                info!("Dropped {dropped} syntactic matches with out-of-range octets");
            }
        }

        if candidates.is_empty() {
            info!(
                "No addresses collected from any source; leaving {} untouched",
                config.output.display()
            );
            return Ok(PipelineReport {
                total_addresses: 0,
                resolved: 0,
                unresolved: 0,
                cache_hits: 0,
                remote_lookups: 0,
                pages_fetched: stats.pages_fetched.load(Ordering::SeqCst),
                pages_failed: stats.pages_failed.load(Ordering::SeqCst),
                output: None,
                elapsed_seconds: start.elapsed().as_secs_f64(),
            });
        }

        let addresses = extract::sort_addresses(candidates);
        info!("Collected {} unique addresses", addresses.len());

        // Stage 3: resolve through cache, local database, remote API.
        let cache = CountryCache::load(&config.cache_path);
        debug!("Loaded {} cached entries", cache.len());

        let mut backends: Vec<Box<dyn CountryBackend>> = Vec::new();
        let geoip_path = config.geoip_db.clone().or_else(|| {
            let default = PathBuf::from(DEFAULT_GEOIP_DB);
            default.exists().then_some(default)
        });
        if let Some(path) = geoip_path {
            match GeoDbBackend::open(&path) {
                Ok(backend) => {
                    info!("Using local geolocation database {}", path.display());
                    backends.push(Box::new(backend));
                }
                Err(err) => {
                    warn!("Local geolocation database unavailable ({err}); using remote lookups only");
                }
            }
        }

        let token = config
            .ipinfo_token
            .clone()
            .or_else(|| std::env::var(IPINFO_TOKEN_ENV).ok());
        backends.push(Box::new(IpinfoBackend::new(
            client,
            config.ipinfo_url.clone(),
            token,
            Duration::from_millis(config.lookup_delay_ms),
        )));

        let mut resolver = Resolver::new(backends, cache, Arc::clone(&stats));
        let labels = resolver.resolve_all(&addresses, config.concurrency).await;

        // Persist the cache before touching the output file: the lookups are
        // already paid for, and an unwritable output must not discard them.
        let cache = resolver.into_cache();
        if let Err(err) = cache.persist() {
            warn!(
                "Failed to persist cache to {}: {err}",
                config.cache_path.display()
            );
        }

        // Stage 4: annotate in canonical order, overwrite the output file.
        let lines = annotate::annotate(&addresses, &labels);
        annotate::write_output(&config.output, &lines)
            .with_context(|| format!("Failed to write output file {}", config.output.display()))?;
        info!("Wrote {} lines to {}", lines.len(), config.output.display());

        let resolved = labels.values().filter(|label| label.is_some()).count();
        Ok(PipelineReport {
            total_addresses: addresses.len(),
            resolved,
            unresolved: addresses.len() - resolved,
            cache_hits: stats.cache_hits.load(Ordering::SeqCst),
            remote_lookups: stats.remote_lookups.load(Ordering::SeqCst),
            pages_fetched: stats.pages_fetched.load(Ordering::SeqCst),
            pages_failed: stats.pages_failed.load(Ordering::SeqCst),
            output: Some(config.output.clone()),
            elapsed_seconds: start.elapsed().as_secs_f64(),
        })
    }
}
