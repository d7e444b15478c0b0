use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use glissade_core::fetch::{FetchError, Fetcher};

/// Marker header sent with every page request, so servers can distinguish
/// in-page navigation fetches from full page loads.
const REQUESTED_WITH: &str = "glissade";

/// [`Fetcher`] backed by a shared [`reqwest::Client`].
///
/// The timeout is applied per request, not on the client, because the
/// orchestrator owns the deadline and may differ per call.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Reuse an existing client, keeping its connection pool and defaults.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, href: &str, timeout: Duration) -> Result<String, FetchError> {
        debug!(href, timeout_ms = timeout.as_millis() as u64, "fetching page");
        let response = self
            .client
            .get(href)
            .timeout(timeout)
            .header("x-requested-with", REQUESTED_WITH)
            .send()
            .await
            .map_err(|err| classify(href, timeout, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                href: href.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|err| classify(href, timeout, err))
    }
}

fn classify(href: &str, timeout: Duration, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            href: href.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        }
    } else {
        FetchError::Network {
            href: href.to_string(),
            reason: err.to_string(),
        }
    }
}
