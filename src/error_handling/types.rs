//! Error type definitions.

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] reqwest::Error),
}

/// Failure kinds observed while fetching a source page.
///
/// The taxonomy drives retry policy: rate limiting, timeouts, connection
/// failures, and 5xx responses are retried with backoff; access-denied
/// responses rotate the identifying header and retry; everything else is
/// treated as a permanently-absent source.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP 429 - the source is rate limiting us.
    #[error("rate limited (HTTP 429)")]
    RateLimited,

    /// HTTP 403 - typically a bot filter keyed on the identifying header.
    #[error("access denied (HTTP 403)")]
    Forbidden,

    /// HTTP 404 - the page is gone; retrying cannot help.
    #[error("not found (HTTP 404)")]
    NotFound,

    /// The request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// TCP/TLS connection failure.
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other unexpected HTTP status.
    #[error("unexpected status {0}")]
    Status(u16),

    /// Request construction, body, or decode failure.
    #[error("request failed: {0}")]
    Other(String),
}

impl FetchError {
    /// Whether the fetch should be retried (with backoff, and a rotated
    /// identifying header for `Forbidden`).
    pub fn is_retriable(&self) -> bool {
        match self {
            FetchError::RateLimited
            | FetchError::Forbidden
            | FetchError::Timeout
            | FetchError::Connect(_) => true,
            FetchError::Status(code) => *code >= 500,
            FetchError::NotFound | FetchError::Other(_) => false,
        }
    }
}

/// Failures from a single country-lookup backend.
///
/// These never propagate past the backend chain; the resolver logs them and
/// moves to the next backend in precedence order.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Network-level failure talking to the remote lookup service.
    #[error("lookup request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with something that is not the expected JSON.
    #[error("malformed lookup response: {0}")]
    MalformedResponse(String),

    /// The local geolocation database could not be opened or queried.
    #[error("geolocation database error: {0}")]
    Database(String),
}

/// Failures reading or writing the address-to-country cache file.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Filesystem error on the cache file.
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The cache file exists but does not parse as a JSON object.
    #[error("cache parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retriable_kinds() {
        assert!(FetchError::RateLimited.is_retriable());
        assert!(FetchError::Forbidden.is_retriable());
        assert!(FetchError::Timeout.is_retriable());
        assert!(FetchError::Connect("refused".into()).is_retriable());
        assert!(FetchError::Status(503).is_retriable());
    }

    #[test]
    fn test_non_retriable_kinds() {
        assert!(!FetchError::NotFound.is_retriable());
        assert!(!FetchError::Status(400).is_retriable());
        assert!(!FetchError::Other("boom".into()).is_retriable());
    }
}
