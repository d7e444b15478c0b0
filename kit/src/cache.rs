use std::collections::HashMap;

use parking_lot::Mutex;

use glissade_core::cache::{PageCache, PageFuture};

/// In-memory [`PageCache`] keyed by raw href.
///
/// Entries hold shared futures, so a page inserted while still in flight is
/// handed out to every later consumer without a second fetch.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, PageFuture>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PageCache for MemoryCache {
    fn has(&self, href: &str) -> bool {
        self.entries.lock().contains_key(href)
    }

    fn get(&self, href: &str) -> Option<PageFuture> {
        self.entries.lock().get(href).cloned()
    }

    fn set(&self, href: &str, page: PageFuture) {
        // Keep a pending or resolved entry over a newcomer for the same href.
        self.entries.lock().entry(href.to_string()).or_insert(page);
    }

    fn delete(&self, href: &str) {
        self.entries.lock().remove(href);
    }

    fn clear(&self) {
        self.entries.lock().clear();
    }

    fn len(&self) -> usize {
        self.entries.lock().len()
    }
}
