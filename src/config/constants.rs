//! Configuration constants.
//!
//! This module defines the configuration constants used throughout the
//! application, including default sources, timeouts, and retry parameters.

/// Default pages to scrape for edge-node IPv4 addresses.
///
/// These are public pages that publish regularly-refreshed lists of
/// Cloudflare-fronted edge addresses. Any of them disappearing is not fatal;
/// the pipeline continues with whatever sources respond.
pub const DEFAULT_SOURCES: &[&str] = &[
    "https://ip.164746.xyz",
    "https://cf.090227.xyz",
    "https://stock.hostmonit.com/CloudFlareYes",
    "https://www.wetest.vip/page/cloudflare/address_v4.html",
];

/// Pattern matching an IPv4-shaped token: four groups of 1-3 digits,
/// word-boundary delimited. Deliberately syntactic only; `999.999.999.999`
/// matches. Range validation is a separate, opt-in step.
pub const IP_PATTERN: &str = r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b";

/// Pattern matching a CIDR block entry (`a.b.c.d/len`) in list mode.
pub const CIDR_PATTERN: &str = r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}/[0-9]{1,2}\b";

/// Default output file path.
pub const DEFAULT_OUTPUT_FILE: &str = "ip.txt";

/// Default address-to-country cache file path.
pub const DEFAULT_CACHE_FILE: &str = "ip_country_cache.json";

/// Default local GeoLite2 country database path.
///
/// The file is optional; when missing the resolver degrades to the remote
/// lookup API only.
pub const DEFAULT_GEOIP_DB: &str = "./GeoLite2-Country.mmdb";

/// Base URL of the remote lookup service (queried as `{base}/{ip}/json`).
pub const DEFAULT_IPINFO_URL: &str = "https://ipinfo.io";

/// Environment variable carrying an optional ipinfo access token.
pub const IPINFO_TOKEN_ENV: &str = "IPINFO_TOKEN";

/// Per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Fixed delay after each remote-API lookup, in milliseconds.
///
/// The free ipinfo endpoint has no documented rate limit but throttles
/// aggressive callers; this matches the interval the service tolerates.
/// Skipped entirely on cache and local-database hits.
pub const DEFAULT_LOOKUP_DELAY_MS: u64 = 180;

// Retry parameters for page fetching. tokio_retry exponentiates the base
// and multiplies by the factor, so base 2 with a 250ms factor yields
// 500ms, 1s, 2s, 4s, ... up to the cap.
/// Exponent base for the retry backoff.
pub const RETRY_DELAY_BASE: u64 = 2;
/// Millisecond multiplier applied to each backoff power.
pub const RETRY_DELAY_FACTOR_MS: u64 = 250;
/// First retry delay in milliseconds (base x factor).
pub const RETRY_INITIAL_DELAY_MS: u64 = RETRY_DELAY_BASE * RETRY_DELAY_FACTOR_MS;
/// Maximum delay between retries in seconds.
pub const RETRY_MAX_DELAY_SECS: u64 = 8;
/// Default number of retry attempts for transient fetch failures.
pub const DEFAULT_RETRY_ATTEMPTS: usize = 3;

/// CIDR blocks wider than this prefix length are skipped instead of being
/// expanded (a /8 is 16 million addresses; expanding one is never intended).
pub const DEFAULT_MAX_EXPAND_PREFIX: u8 = 20;

/// Identifying User-Agent headers rotated through on access-denied (403)
/// responses. Some of the source pages sit behind bot filters that key on
/// the User-Agent alone.
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:128.0) Gecko/20100101 Firefox/128.0",
];
