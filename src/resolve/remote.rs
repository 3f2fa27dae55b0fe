//! Remote lookup API backend (ipinfo-compatible).

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::country::display_label;
use super::CountryBackend;
use crate::error_handling::ResolveError;

/// The subset of the lookup service's JSON body the resolver cares about.
#[derive(Debug, Deserialize)]
struct LookupResponse {
    country: Option<String>,
}

/// Country backend querying `{base}/{ip}/json` over HTTPS.
///
/// A fixed delay follows every call, successful or not, to stay inside the
/// service's informal rate limits. Cache hits never reach this backend, so
/// repeat runs pay the delay only for genuinely new addresses.
pub struct IpinfoBackend {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    delay: Duration,
}

impl IpinfoBackend {
    /// Creates a backend against `base_url` with an optional access token
    /// (passed as a `token` query parameter).
    pub fn new(
        client: reqwest::Client,
        base_url: String,
        token: Option<String>,
        delay: Duration,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            delay,
        }
    }

    async fn query(&self, address: &str) -> Result<Option<String>, ResolveError> {
        let url = format!("{}/{}/json", self.base_url, address);
        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.query(&[("token", token.as_str())]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Ok(None);
        }

        let body: LookupResponse = response
            .json()
            .await
            .map_err(|err| ResolveError::MalformedResponse(err.to_string()))?;
        Ok(body.country.map(|code| display_label(&code)))
    }
}

#[async_trait]
impl CountryBackend for IpinfoBackend {
    fn name(&self) -> &'static str {
        "ipinfo"
    }

    fn is_remote(&self) -> bool {
        true
    }

    async fn lookup(&self, address: &str) -> Result<Option<String>, ResolveError> {
        let result = self.query(address).await;
        // Pace the next call regardless of outcome; failures count against
        // the rate limit too.
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        result
    }
}
