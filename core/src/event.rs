use async_trait::async_trait;

use crate::dom::ElementRef;

/// A user or browser interaction relevant to navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// Pointer entered (or touch started on) a link-like element.
    LinkEnter(ElementRef),
    /// A link-like element was activated.
    LinkClick(ElementRef),
    /// The browser moved its own history stack; payload is the target href.
    PopState(String),
}

/// Source of navigation events (host event loop, test script, ...).
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Returns the next event, or `None` once the source is exhausted or
    /// unbound.
    async fn next_event(&mut self) -> Option<NavEvent>;
}
