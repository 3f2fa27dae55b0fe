//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, USER_AGENTS};
use crate::error_handling::InitializationError;

/// Initializes the shared HTTP client.
///
/// Creates a `reqwest::Client` configured with:
/// - Timeout from the configuration
/// - The first identifying User-Agent as the client default (per-request
///   rotation overrides it when a source answers 403)
/// - Rustls TLS backend
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(USER_AGENTS[0])
        .build()?;
    Ok(client)
}
