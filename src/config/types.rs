//! Configuration types and CLI options.
//!
//! This module defines the enums and the struct used for command-line
//! argument parsing and library configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_CACHE_FILE, DEFAULT_IPINFO_URL, DEFAULT_LOOKUP_DELAY_MS, DEFAULT_MAX_EXPAND_PREFIX,
    DEFAULT_OUTPUT_FILE, DEFAULT_RETRY_ATTEMPTS, DEFAULT_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Pipeline configuration.
///
/// Doubles as the CLI surface (via `clap::Parser`) and the plain
/// configuration struct the library consumes. Library callers construct it
/// with struct-update syntax:
///
/// ```no_run
/// use ip_collector::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     output: PathBuf::from("edges.txt"),
///     concurrency: 8,
///     ..Default::default()
/// };
/// ```
#[derive(Parser, Debug, Clone)]
#[command(
    name = "ip_collector",
    version,
    about = "Scrape edge-node IPv4 addresses, resolve countries, write an annotated list"
)]
pub struct Config {
    /// Page URL to scrape; repeatable. Empty means the built-in source list.
    #[arg(long = "source", value_name = "URL")]
    pub sources: Vec<String>,

    /// Alternate mode: URL of a CIDR block listing. Replaces page scraping.
    #[arg(long, value_name = "URL")]
    pub cidr_source: Option<String>,

    /// Skip CIDR blocks wider than this prefix length instead of expanding
    #[arg(long, value_name = "LEN", default_value_t = DEFAULT_MAX_EXPAND_PREFIX)]
    pub max_expand_prefix: u8,

    /// Output file path (fully overwritten each run)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Address-to-country cache file path
    #[arg(long = "cache", default_value = DEFAULT_CACHE_FILE)]
    pub cache_path: PathBuf,

    /// Local GeoLite2 country database; omit to use the default path if
    /// present, remote-only otherwise
    #[arg(long, value_name = "PATH")]
    pub geoip_db: Option<PathBuf>,

    /// ipinfo access token (also read from the IPINFO_TOKEN env var)
    #[arg(long, value_name = "TOKEN")]
    pub ipinfo_token: Option<String>,

    /// Base URL of the remote lookup service
    #[arg(long, default_value = DEFAULT_IPINFO_URL)]
    pub ipinfo_url: String,

    /// Per-request timeout in seconds
    #[arg(long = "timeout", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Retry attempts for rate-limited or transient fetch failures
    #[arg(long = "retries", default_value_t = DEFAULT_RETRY_ATTEMPTS)]
    pub retry_attempts: usize,

    /// Delay after each remote-API lookup in milliseconds
    #[arg(long, default_value_t = DEFAULT_LOOKUP_DELAY_MS)]
    pub lookup_delay_ms: u64,

    /// Worker-pool size for remote lookups (1 = fully sequential)
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// Reject syntactic matches with an octet above 255
    #[arg(long)]
    pub validate_octets: bool,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            cidr_source: None,
            max_expand_prefix: DEFAULT_MAX_EXPAND_PREFIX,
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            cache_path: PathBuf::from(DEFAULT_CACHE_FILE),
            geoip_db: None,
            ipinfo_token: None,
            ipinfo_url: DEFAULT_IPINFO_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            lookup_delay_ms: DEFAULT_LOOKUP_DELAY_MS,
            concurrency: 1,
            validate_octets: false,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_default_config_matches_constants() {
        let config = Config::default();
        assert!(config.sources.is_empty());
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT_FILE));
        assert_eq!(config.cache_path, PathBuf::from(DEFAULT_CACHE_FILE));
        assert_eq!(config.concurrency, 1);
        assert!(!config.validate_octets);
    }

    #[test]
    fn test_cli_parsing_overrides() {
        let config = Config::parse_from([
            "ip_collector",
            "--source",
            "https://example.com/a",
            "--source",
            "https://example.com/b",
            "--output",
            "custom.txt",
            "--concurrency",
            "4",
            "--validate-octets",
        ]);
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.output, PathBuf::from("custom.txt"));
        assert_eq!(config.concurrency, 4);
        assert!(config.validate_octets);
    }
}
