use std::time::Duration;

use glissade_core::fetch::{ErrorDisposition, FetchError, RequestErrorHandler};
use glissade_core::prevent::PreventRule;
use glissade_core::schema::AttributeSchema;
use glissade_core::state::Trigger;

/// Default upper bound for a page fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2000);

/// Configuration bundle for the [`Navigator`](crate::Navigator).
pub struct NavigatorOptions {
    /// Upper bound enforced by the fetch collaborator.
    pub timeout: Duration,
    /// Keep fetched pages for reuse.
    pub cache_pages: bool,
    /// Fetch speculatively on hover/touch.
    pub prefetch: bool,
    /// Data-attribute names the host document is annotated with.
    pub schema: AttributeSchema,
    /// Custom exclusion rules, installed during initialization.
    pub prevent_rules: Vec<(String, PreventRule)>,
    /// Consulted when a fetch fails, before the hard-navigation fallback.
    pub on_request_error: Option<RequestErrorHandler>,
    /// Tracing filter directive installed at initialization, e.g. `"debug"`.
    pub log_filter: Option<String>,
}

impl Default for NavigatorOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            cache_pages: true,
            prefetch: true,
            schema: AttributeSchema::default(),
            prevent_rules: Vec::new(),
            on_request_error: None,
            log_filter: None,
        }
    }
}

impl NavigatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn without_cache(mut self) -> Self {
        self.cache_pages = false;
        self
    }

    pub fn without_prefetch(mut self) -> Self {
        self.prefetch = false;
        self
    }

    pub fn with_schema(mut self, schema: AttributeSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_prevent_rule(mut self, name: impl Into<String>, rule: PreventRule) -> Self {
        self.prevent_rules.push((name.into(), rule));
        self
    }

    pub fn on_request_error<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Trigger, &str, &FetchError) -> ErrorDisposition + Send + Sync + 'static,
    {
        self.on_request_error = Some(std::sync::Arc::new(handler));
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = NavigatorOptions::default();
        assert_eq!(options.timeout, Duration::from_millis(2000));
        assert!(options.cache_pages);
        assert!(options.prefetch);
        assert!(options.on_request_error.is_none());
    }
}
