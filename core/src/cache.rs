use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};

use crate::fetch::FetchError;

/// An eventually-resolved page body.
///
/// Clones share one underlying fetch, so concurrent prefetch and click
/// requests for the same href never issue duplicates.
pub type PageFuture = Shared<BoxFuture<'static, Result<Arc<str>, FetchError>>>;

/// Wrap already-available markup as a resolved [`PageFuture`].
///
/// Used to seed the cache with the initial page so it is never re-fetched.
pub fn ready_page(html: impl Into<Arc<str>>) -> PageFuture {
    let html = html.into();
    async move { Ok(html) }.boxed().shared()
}

/// Async memoization of "href -> eventually-resolved markup".
///
/// Entries are created speculatively (prefetch) or on demand (click,
/// popstate). A pending entry is never overwritten; a failed fetch evicts
/// its entry so a later attempt can retry.
pub trait PageCache: Send + Sync {
    fn has(&self, href: &str) -> bool;

    fn get(&self, href: &str) -> Option<PageFuture>;

    /// Insert an entry. Implementations must keep an existing entry for the
    /// same href rather than replacing it.
    fn set(&self, href: &str, page: PageFuture);

    /// Evict an entry so a later attempt can retry.
    fn delete(&self, href: &str);

    fn clear(&self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;

    #[test]
    fn ready_page_is_immediately_resolved() {
        let page = ready_page("<html></html>");
        let html = page.now_or_never().unwrap().unwrap();
        assert_eq!(html.as_ref(), "<html></html>");
    }

    #[test]
    fn clones_share_resolution() {
        let page = ready_page("x");
        let a = page.clone().now_or_never().unwrap().unwrap();
        let b = page.now_or_never().unwrap().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
