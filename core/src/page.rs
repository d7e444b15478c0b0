use std::sync::Arc;

use crate::dom::ElementRef;
use crate::url::PageUrl;

/// Snapshot of a navigable page.
///
/// Built up over a navigation cycle: the URL is known at admission, markup
/// and namespace arrive with the fetch, the container exists only once the
/// page is physically in the document.
#[derive(Debug, Clone, Default)]
pub struct PageRecord {
    pub url: PageUrl,
    /// Raw markup, shared with the cache.
    pub html: Option<Arc<str>>,
    /// Logical route identifier, used for transition and view selection.
    pub namespace: Option<String>,
    /// Live container handle. `Some` only while this record is the page
    /// physically present in the document.
    pub container: Option<ElementRef>,
}

impl PageRecord {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_url(href: &str) -> Self {
        Self {
            url: PageUrl::parse(href),
            ..Default::default()
        }
    }

    /// An empty record marks the idle half of a navigation cycle.
    pub fn is_empty(&self) -> bool {
        self.url.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record() {
        assert!(PageRecord::empty().is_empty());
        assert!(!PageRecord::with_url("/home").is_empty());
    }
}
