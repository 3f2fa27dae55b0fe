//! Source page fetching with selective retry.
//!
//! One fetcher is shared across the whole run. Rate-limited, timed-out, and
//! 5xx responses are retried with exponential backoff; access-denied
//! responses rotate to the next identifying header before the retry. A
//! source that exhausts the policy is logged and skipped, never fatal.

use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, warn};
use tokio_retry::RetryIf;

use crate::config::USER_AGENTS;
use crate::error_handling::{categorize_reqwest_error, categorize_status, get_retry_strategy, FetchError};

/// Retrieves raw page text from source URLs.
pub struct Fetcher {
    client: reqwest::Client,
    retry_attempts: usize,
    /// Index into [`USER_AGENTS`]; bumped on every 403 so the retry (and
    /// every request after it) presents a different identity.
    ua_index: AtomicUsize,
}

impl Fetcher {
    /// Creates a fetcher over a shared HTTP client.
    pub fn new(client: reqwest::Client, retry_attempts: usize) -> Self {
        Self {
            client,
            retry_attempts,
            ua_index: AtomicUsize::new(0),
        }
    }

    fn current_user_agent(&self) -> &'static str {
        USER_AGENTS[self.ua_index.load(Ordering::SeqCst) % USER_AGENTS.len()]
    }

    fn rotate_user_agent(&self) {
        self.ua_index.fetch_add(1, Ordering::SeqCst);
    }

    /// One request attempt; categorizes every failure into a `FetchError`.
    async fn try_fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, self.current_user_agent())
            .send()
            .await
            .map_err(|err| categorize_reqwest_error(&err))?;

        let status = response.status();
        if !status.is_success() {
            let err = categorize_status(status);
            if matches!(err, FetchError::Forbidden) {
                // Rotate now so the retry already carries the next identity.
                self.rotate_user_agent();
            }
            return Err(err);
        }

        response
            .text()
            .await
            .map_err(|err| categorize_reqwest_error(&err))
    }

    /// Fetches a page under the retry policy.
    ///
    /// Returns `None` once the policy is exhausted or the failure is
    /// non-recoverable; the caller logs the skip and moves on. A single
    /// source failing is not fatal to the run.
    pub async fn fetch_page(&self, url: &str) -> Option<String> {
        debug!("Fetching {url}");
        let strategy = get_retry_strategy(self.retry_attempts);

        let result = RetryIf::spawn(strategy, || self.try_fetch(url), FetchError::is_retriable).await;

        match result {
            Ok(text) => {
                debug!("Fetched {url} ({} bytes)", text.len());
                Some(text)
            }
            Err(err) => {
                warn!("Skipping {url}: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{matchers::*, responders::*, Expectation, Server};

    fn fetcher(retries: usize) -> Fetcher {
        Fetcher::new(reqwest::Client::new(), retries)
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/list"))
                .respond_with(status_code(200).body("1.2.3.4")),
        );

        let text = fetcher(2).fetch_page(&server.url_str("/list")).await;
        assert_eq!(text.as_deref(), Some("1.2.3.4"));
    }

    #[tokio::test]
    async fn test_rate_limit_retried_then_succeeds() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/list"))
                .times(2)
                .respond_with(cycle![
                    status_code(429),
                    status_code(200).body("5.6.7.8"),
                ]),
        );

        let text = fetcher(2).fetch_page(&server.url_str("/list")).await;
        assert_eq!(text.as_deref(), Some("5.6.7.8"));
    }

    #[tokio::test]
    async fn test_forbidden_rotates_identifying_header() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/list"),
                request::headers(contains(("user-agent", USER_AGENTS[0]))),
            ])
            .respond_with(status_code(403)),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/list"),
                request::headers(contains(("user-agent", USER_AGENTS[1]))),
            ])
            .respond_with(status_code(200).body("9.9.9.9")),
        );

        let text = fetcher(2).fetch_page(&server.url_str("/list")).await;
        assert_eq!(text.as_deref(), Some("9.9.9.9"));
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/gone"))
                .times(1)
                .respond_with(status_code(404)),
        );

        let text = fetcher(3).fetch_page(&server.url_str("/gone")).await;
        assert_eq!(text, None);
    }

    #[tokio::test]
    async fn test_persistent_server_error_gives_up() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/flaky"))
                .times(2)
                .respond_with(status_code(503)),
        );

        // One retry after the initial attempt = 2 requests total.
        let text = fetcher(1).fetch_page(&server.url_str("/flaky")).await;
        assert_eq!(text, None);
    }
}
