use async_trait::async_trait;
use uuid::Uuid;

use crate::cache::PageFuture;
use crate::dom::{Document, ElementRef};
use crate::schema::AttributeSchema;
use crate::state::NavigationState;

/// Selection criteria handed to [`TransitionRunner::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Criteria {
    /// Select the one-shot entrance variant instead of a page-to-page one.
    pub appear: bool,
    /// The navigation targets the same logical page.
    pub self_nav: bool,
}

/// Opaque identity of a resolved transition definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionHandle(pub Uuid);

impl TransitionHandle {
    /// The reserved handle for a runner's built-in bare swap, used when no
    /// registered definition matches a page navigation.
    pub fn fallback() -> Self {
        Self(Uuid::nil())
    }

    pub fn is_fallback(&self) -> bool {
        self.0.is_nil()
    }
}

/// Execution context for the one-shot entrance animation.
pub struct AppearCtx<'a> {
    pub state: &'a NavigationState,
    pub transition: TransitionHandle,
    pub wrapper: ElementRef,
    pub doc: &'a dyn Document,
}

/// Execution context for a page-to-page transition.
pub struct PageCtx<'a> {
    pub state: &'a NavigationState,
    /// The next page's markup, possibly still in flight.
    pub page: PageFuture,
    pub transition: TransitionHandle,
    pub wrapper: ElementRef,
    pub doc: &'a dyn Document,
    pub schema: &'a AttributeSchema,
}

/// Resolves a transition definition for given route data and executes its
/// async lifecycle.
///
/// The runner owns the document splice: `run_page` is responsible for
/// leaving the old container, splicing the fetched markup in, and entering
/// the new one. The orchestrator never touches the DOM subtree during a
/// transition.
#[async_trait]
pub trait TransitionRunner: Send + Sync {
    /// Match a transition definition against the navigation state. Runners
    /// should fall back to [`TransitionHandle::fallback`] for page
    /// navigations rather than returning `None`.
    fn resolve(&self, state: &NavigationState, criteria: &Criteria) -> Option<TransitionHandle>;

    async fn run_appear(&self, ctx: AppearCtx<'_>) -> anyhow::Result<()>;

    /// Run leave/enter around the container swap. Returns the new live
    /// container on success.
    async fn run_page(&self, ctx: PageCtx<'_>) -> anyhow::Result<ElementRef>;

    /// A transition is currently executing. While true, new navigation
    /// attempts degrade to a hard reload.
    fn is_running(&self) -> bool;

    /// An entrance variant is registered.
    fn has_appear(&self) -> bool;

    /// A same-page variant is registered.
    fn has_self(&self) -> bool;

    /// Resolution needs the next page's namespace, so the orchestrator must
    /// wait for the fetched markup before resolving.
    fn should_wait(&self) -> bool;
}
