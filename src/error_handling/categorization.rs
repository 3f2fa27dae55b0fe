//! Error categorization and retry strategy.

use std::time::Duration;

use reqwest::StatusCode;
use tokio_retry::strategy::ExponentialBackoff;

use super::types::FetchError;
use crate::config::{RETRY_DELAY_BASE, RETRY_DELAY_FACTOR_MS, RETRY_MAX_DELAY_SECS};

/// Creates the exponential backoff retry strategy used for page fetches.
///
/// `ExponentialBackoff::from_millis` exponentiates its argument per
/// attempt; the factor scales each power into milliseconds. The resulting
/// delays start at `RETRY_DELAY_BASE * RETRY_DELAY_FACTOR_MS` (500ms),
/// double each retry, and cap at `RETRY_MAX_DELAY_SECS` seconds, for at
/// most `attempts` retries.
pub fn get_retry_strategy(attempts: usize) -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(RETRY_DELAY_BASE)
        .factor(RETRY_DELAY_FACTOR_MS)
        .max_delay(Duration::from_secs(RETRY_MAX_DELAY_SECS))
        .take(attempts)
}

/// Categorizes an HTTP response status into a `FetchError`.
///
/// Only called for non-success statuses.
pub fn categorize_status(status: StatusCode) -> FetchError {
    match status.as_u16() {
        403 => FetchError::Forbidden,
        404 => FetchError::NotFound,
        429 => FetchError::RateLimited,
        code => FetchError::Status(code),
    }
}

/// Categorizes a `reqwest::Error` into a `FetchError`.
///
/// Handles transport-level failures; status-carrying errors are routed
/// through [`categorize_status`] for consistency.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> FetchError {
    if let Some(status) = error.status() {
        return categorize_status(status);
    }

    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_connect() {
        FetchError::Connect(error.to_string())
    } else {
        FetchError::Other(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_strategy_is_bounded() {
        let delays: Vec<Duration> = get_retry_strategy(3).collect();
        assert_eq!(delays.len(), 3);
    }

    #[test]
    fn test_retry_delays_double_from_initial() {
        use crate::config::RETRY_INITIAL_DELAY_MS;

        let delays: Vec<Duration> = get_retry_strategy(4).collect();
        assert_eq!(delays[0], Duration::from_millis(RETRY_INITIAL_DELAY_MS));
        for pair in delays.windows(2) {
            assert_eq!(pair[1], pair[0] * 2, "each retry doubles the delay");
        }
    }

    #[test]
    fn test_retry_strategy_caps_delay() {
        let max = get_retry_strategy(10).max().unwrap();
        assert!(max <= Duration::from_secs(RETRY_MAX_DELAY_SECS));
    }

    #[test]
    fn test_status_categorization() {
        assert!(matches!(
            categorize_status(StatusCode::TOO_MANY_REQUESTS),
            FetchError::RateLimited
        ));
        assert!(matches!(
            categorize_status(StatusCode::FORBIDDEN),
            FetchError::Forbidden
        ));
        assert!(matches!(
            categorize_status(StatusCode::NOT_FOUND),
            FetchError::NotFound
        ));
        assert!(matches!(
            categorize_status(StatusCode::BAD_GATEWAY),
            FetchError::Status(502)
        ));
    }
}
