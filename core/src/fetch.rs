use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::state::Trigger;

/// Failure modes of a page fetch.
///
/// `Clone` is required: a failed cache entry hands the same error to every
/// awaiter of the shared future.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("request for {href} timed out after {timeout_ms}ms")]
    Timeout { href: String, timeout_ms: u64 },
    #[error("request for {href} answered {status}")]
    Status { href: String, status: u16 },
    #[error("request for {href} failed: {reason}")]
    Network { href: String, reason: String },
}

/// Retrieves raw page markup for an href.
///
/// The timeout is an upper bound the fetcher must enforce itself; the
/// orchestrator never cancels an in-flight fetch cooperatively.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, href: &str, timeout: Duration) -> Result<String, FetchError>;
}

/// What a custom request-error handler decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDisposition {
    /// The handler absorbed the failure; skip the built-in fallback.
    Handled,
    /// Run the built-in fallback: hard navigation for click-triggered
    /// fetches.
    UseDefault,
}

/// Hook consulted when a fetch fails, before the built-in fallback runs.
pub type RequestErrorHandler =
    Arc<dyn Fn(&Trigger, &str, &FetchError) -> ErrorDisposition + Send + Sync>;
