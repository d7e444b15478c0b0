use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use async_trait::async_trait;
use futures_util::future::BoxFuture;
use tracing::debug;
use uuid::Uuid;

use glissade_core::dom::{Document, ElementRef};
use glissade_core::markup;
use glissade_core::state::NavigationState;
use glissade_core::transition::{AppearCtx, Criteria, PageCtx, TransitionHandle, TransitionRunner};

/// Namespace constraint on one side of a transition definition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RouteRule {
    /// Matches every namespace, including pages without one.
    #[default]
    Any,
    Namespace(String),
}

impl RouteRule {
    fn matches(&self, namespace: Option<&str>) -> bool {
        match self {
            RouteRule::Any => true,
            RouteRule::Namespace(want) => namespace == Some(want.as_str()),
        }
    }

    fn weight(&self) -> usize {
        match self {
            RouteRule::Any => 0,
            RouteRule::Namespace(_) => 1,
        }
    }
}

/// Execution context handed to phase hooks.
pub struct Phase<'a> {
    pub state: &'a NavigationState,
    pub doc: &'a dyn Document,
    pub wrapper: ElementRef,
    /// The container the phase acts on: the outgoing one during leave, the
    /// freshly spliced one during enter.
    pub container: Option<ElementRef>,
}

/// Async lifecycle hook for one phase of a transition.
pub type PhaseHook =
    Arc<dyn for<'a> Fn(Phase<'a>) -> BoxFuture<'a, anyhow::Result<()>> + Send + Sync>;

/// A registered transition: namespace rules plus phase hooks.
pub struct TransitionDefinition {
    id: Uuid,
    name: String,
    from: RouteRule,
    to: RouteRule,
    appear: Option<PhaseHook>,
    leave: Option<PhaseHook>,
    enter: Option<PhaseHook>,
    self_only: bool,
}

impl TransitionDefinition {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            from: RouteRule::Any,
            to: RouteRule::Any,
            appear: None,
            leave: None,
            enter: None,
            self_only: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> TransitionHandle {
        TransitionHandle(self.id)
    }

    pub fn from_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.from = RouteRule::Namespace(namespace.into());
        self
    }

    pub fn to_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.to = RouteRule::Namespace(namespace.into());
        self
    }

    /// Restrict this definition to same-page navigations.
    pub fn self_only(mut self) -> Self {
        self.self_only = true;
        self
    }

    pub fn on_appear<F>(mut self, hook: F) -> Self
    where
        F: for<'a> Fn(Phase<'a>) -> BoxFuture<'a, anyhow::Result<()>> + Send + Sync + 'static,
    {
        self.appear = Some(Arc::new(hook));
        self
    }

    pub fn on_leave<F>(mut self, hook: F) -> Self
    where
        F: for<'a> Fn(Phase<'a>) -> BoxFuture<'a, anyhow::Result<()>> + Send + Sync + 'static,
    {
        self.leave = Some(Arc::new(hook));
        self
    }

    pub fn on_enter<F>(mut self, hook: F) -> Self
    where
        F: for<'a> Fn(Phase<'a>) -> BoxFuture<'a, anyhow::Result<()>> + Send + Sync + 'static,
    {
        self.enter = Some(Arc::new(hook));
        self
    }
}

/// Per-namespace enter wrappers, run around the matched definition's enter
/// hook on every arrival at that namespace.
pub struct View {
    namespace: String,
    before_enter: Option<PhaseHook>,
    after_enter: Option<PhaseHook>,
}

impl View {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            before_enter: None,
            after_enter: None,
        }
    }

    pub fn before_enter<F>(mut self, hook: F) -> Self
    where
        F: for<'a> Fn(Phase<'a>) -> BoxFuture<'a, anyhow::Result<()>> + Send + Sync + 'static,
    {
        self.before_enter = Some(Arc::new(hook));
        self
    }

    pub fn after_enter<F>(mut self, hook: F) -> Self
    where
        F: for<'a> Fn(Phase<'a>) -> BoxFuture<'a, anyhow::Result<()>> + Send + Sync + 'static,
    {
        self.after_enter = Some(Arc::new(hook));
        self
    }
}

/// Registry-backed [`TransitionRunner`].
///
/// Resolution walks the registered definitions and keeps the most specific
/// match, with registration order breaking ties. Page navigations without a
/// match fall back to a bare container swap.
#[derive(Default)]
pub struct TransitionStore {
    definitions: Vec<TransitionDefinition>,
    views: Vec<View>,
    running: AtomicBool,
}

impl TransitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, definition: TransitionDefinition) {
        self.definitions.push(definition);
    }

    pub fn with(mut self, definition: TransitionDefinition) -> Self {
        self.add(definition);
        self
    }

    pub fn add_view(&mut self, view: View) {
        self.views.push(view);
    }

    pub fn with_view(mut self, view: View) -> Self {
        self.add_view(view);
        self
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    fn definition(&self, handle: TransitionHandle) -> Option<&TransitionDefinition> {
        if handle.is_fallback() {
            return None;
        }
        self.definitions.iter().find(|def| def.id == handle.0)
    }

    fn view(&self, namespace: &str) -> Option<&View> {
        self.views.iter().find(|view| view.namespace == namespace)
    }
}

#[async_trait]
impl TransitionRunner for TransitionStore {
    fn resolve(&self, state: &NavigationState, criteria: &Criteria) -> Option<TransitionHandle> {
        let current = state.current.namespace.as_deref();
        let next = state.next.namespace.as_deref();

        let mut best: Option<(&TransitionDefinition, usize)> = None;
        for def in &self.definitions {
            let eligible = if criteria.appear {
                def.appear.is_some() && def.to.matches(current)
            } else if criteria.self_nav {
                def.self_only && def.from.matches(current) && def.to.matches(next)
            } else {
                !def.self_only && def.from.matches(current) && def.to.matches(next)
            };
            if !eligible {
                continue;
            }
            let specificity = def.from.weight() + def.to.weight();
            // Strictly-greater keeps the first registration on ties.
            if best.is_none_or(|(_, held)| specificity > held) {
                best = Some((def, specificity));
            }
        }

        match best {
            Some((def, _)) => {
                debug!(transition = %def.name, "transition resolved");
                Some(def.handle())
            }
            None if criteria.appear => None,
            None => Some(TransitionHandle::fallback()),
        }
    }

    async fn run_appear(&self, ctx: AppearCtx<'_>) -> anyhow::Result<()> {
        let Some(hook) = self.definition(ctx.transition).and_then(|d| d.appear.as_ref()) else {
            return Ok(());
        };
        hook(Phase {
            state: ctx.state,
            doc: ctx.doc,
            wrapper: ctx.wrapper,
            container: ctx.doc.container(ctx.wrapper),
        })
        .await
        .context("appear hook failed")
    }

    async fn run_page(&self, ctx: PageCtx<'_>) -> anyhow::Result<ElementRef> {
        let _guard = RunGuard::hold(&self.running);
        let def = self.definition(ctx.transition);

        if let Some(hook) = def.and_then(|d| d.leave.as_ref()) {
            hook(Phase {
                state: ctx.state,
                doc: ctx.doc,
                wrapper: ctx.wrapper,
                container: ctx.state.current.container,
            })
            .await
            .context("leave hook failed")?;
        }

        let html = ctx.page.clone().await?;
        let container_html = markup::container_of(&html, ctx.schema)
            .ok_or_else(|| anyhow::anyhow!("fetched markup has no container"))?;
        let new_container = ctx.doc.replace_container(ctx.wrapper, &container_html);

        let namespace = ctx
            .state
            .next
            .namespace
            .clone()
            .or_else(|| markup::namespace_of(&html, ctx.schema));
        let view = namespace.as_deref().and_then(|ns| self.view(ns));

        if let Some(hook) = view.and_then(|v| v.before_enter.as_ref()) {
            hook(enter_phase(&ctx, new_container))
                .await
                .context("view before_enter failed")?;
        }
        if let Some(hook) = def.and_then(|d| d.enter.as_ref()) {
            hook(enter_phase(&ctx, new_container))
                .await
                .context("enter hook failed")?;
        }
        if let Some(hook) = view.and_then(|v| v.after_enter.as_ref()) {
            hook(enter_phase(&ctx, new_container))
                .await
                .context("view after_enter failed")?;
        }

        Ok(new_container)
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn has_appear(&self) -> bool {
        self.definitions.iter().any(|def| def.appear.is_some())
    }

    fn has_self(&self) -> bool {
        self.definitions.iter().any(|def| def.self_only)
    }

    fn should_wait(&self) -> bool {
        self.definitions
            .iter()
            .any(|def| def.to != RouteRule::Any && !def.self_only)
    }
}

fn enter_phase<'a>(ctx: &'a PageCtx<'a>, container: ElementRef) -> Phase<'a> {
    Phase {
        state: ctx.state,
        doc: ctx.doc,
        wrapper: ctx.wrapper,
        container: Some(container),
    }
}

/// Holds the run flag for the duration of a page transition, clearing it on
/// every exit path including hook failures.
struct RunGuard<'a>(&'a AtomicBool);

impl<'a> RunGuard<'a> {
    fn hold(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
