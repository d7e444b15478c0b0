//! The navigation orchestrator.
//!
//! `Navigator` is the single navigation authority for a document: it decides,
//! for every navigation attempt, whether to proceed, which cached or freshly
//! fetched markup to use, which transition variant to run, and how to keep
//! history, title and state consistent with an in-flight or completed
//! transition. Collaborators (document surface, fetcher, cache, transition
//! runner) are injected at construction, which keeps the orchestrator
//! testable and destructible.

use std::sync::Arc;

use futures_util::FutureExt;
use tracing::{Instrument, debug, error, info, info_span, warn};

use glissade_core::cache::{PageCache, PageFuture, ready_page};
use glissade_core::dom::{Document, ElementRef};
use glissade_core::error::{NavigationError, SetupError};
use glissade_core::event::{EventSource, NavEvent};
use glissade_core::fetch::{ErrorDisposition, FetchError, Fetcher};
use glissade_core::history::HistoryLog;
use glissade_core::markup;
use glissade_core::page::PageRecord;
use glissade_core::prevent::PreventGuard;
use glissade_core::state::{NavigationState, Trigger};
use glissade_core::transition::{AppearCtx, Criteria, PageCtx, TransitionRunner};
use glissade_core::url::PageUrl;

use crate::hooks::{Hook, HookRegistry};
use crate::logging;
use crate::options::NavigatorOptions;
use crate::plugin::Plugin;

/// How a navigation attempt concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// The async cycle ran to completion.
    Completed,
    /// Interception declined; the browser's native behavior proceeds.
    Native,
    /// Degraded to a full native navigation (overlapping transition).
    HardNavigate,
    /// The cycle failed and was rolled back.
    Failed,
}

pub struct Navigator {
    doc: Arc<dyn Document>,
    fetcher: Arc<dyn Fetcher>,
    cache: Arc<dyn PageCache>,
    runner: Arc<dyn TransitionRunner>,
    prevent: PreventGuard,
    history: HistoryLog,
    hooks: HookRegistry,
    state: NavigationState,
    options: NavigatorOptions,
    wrapper: Option<ElementRef>,
    plugins: Vec<String>,
    source: Option<Box<dyn EventSource>>,
}

impl Navigator {
    pub fn new(
        doc: Arc<dyn Document>,
        fetcher: Arc<dyn Fetcher>,
        cache: Arc<dyn PageCache>,
        runner: Arc<dyn TransitionRunner>,
        options: NavigatorOptions,
    ) -> Self {
        Self {
            doc,
            fetcher,
            cache,
            runner,
            prevent: PreventGuard::new(),
            history: HistoryLog::new(),
            hooks: HookRegistry::new(),
            state: NavigationState::default(),
            options,
            wrapper: None,
            plugins: Vec::new(),
            source: None,
        }
    }

    /// Bring the orchestrator online.
    ///
    /// Discovers the wrapper and its container (both fatal when absent),
    /// installs custom prevent rules, builds the initial state from the
    /// live document, seeds history and cache with the current page, fires
    /// the `ready` hook, then runs the appear transition if one is
    /// registered. Appear failures are logged, never fatal.
    pub async fn initialize(&mut self) -> Result<(), SetupError> {
        if let Some(filter) = self.options.log_filter.clone() {
            logging::init(&filter);
        }

        let wrapper = self.doc.wrapper().ok_or(SetupError::MissingWrapper)?;
        let container = self
            .doc
            .container(wrapper)
            .ok_or(SetupError::MissingContainer)?;

        for (name, rule) in std::mem::take(&mut self.options.prevent_rules) {
            self.prevent.add(&name, rule)?;
        }

        self.doc.mark_live_region(wrapper);
        self.wrapper = Some(wrapper);

        // A session's cache and history do not survive re-initialization.
        self.cache.clear();
        self.history.clear();

        let href = self.doc.current_href();
        let html: Arc<str> = Arc::from(self.doc.outer_html(container));
        let mut current = PageRecord::with_url(&href);
        current.namespace = markup::namespace_of(&html, &self.options.schema);
        current.container = Some(container);

        self.history
            .push(href.as_str(), current.namespace.clone().unwrap_or_default());
        if self.options.cache_pages {
            // The first-ever page is never re-fetched.
            self.cache.set(&href, ready_page(html.clone()));
        }
        current.html = Some(html);
        self.state = NavigationState::new(current);

        info!(href = %self.state.current.url.href, "navigator ready");
        self.hooks.emit(Hook::Ready, &mut self.state);

        self.appear().await;
        Ok(())
    }

    /// Run the entrance transition once against the initial state.
    ///
    /// A failed entrance animation must not block the application from
    /// becoming interactive, so errors are logged only.
    pub async fn appear(&mut self) {
        if !self.runner.has_appear() {
            return;
        }
        let criteria = Criteria {
            appear: true,
            self_nav: false,
        };
        let Some(transition) = self.runner.resolve(&self.state, &criteria) else {
            return;
        };
        let Some(wrapper) = self.wrapper else {
            return;
        };
        let runner = self.runner.clone();
        let ctx = AppearCtx {
            state: &self.state,
            transition,
            wrapper,
            doc: self.doc.as_ref(),
        };
        if let Err(err) = runner.run_appear(ctx).await {
            warn!(error = %err, "appear transition failed");
        }
    }

    /// Navigation admission.
    ///
    /// Decides whether the request starts a transition, is left to the
    /// browser (same logical page, nothing registered for it), or degrades.
    /// When interception proceeds and a host event is present, its default
    /// action is suppressed first.
    pub async fn go(
        &mut self,
        href: &str,
        trigger: Trigger,
        event: Option<&NavEvent>,
    ) -> NavOutcome {
        let self_nav = match trigger {
            // The browser already moved its own stack; compare path-only
            // against the history cursor.
            Trigger::History => {
                let target = PageUrl::parse(href);
                self.history
                    .current()
                    .map(|entry| PageUrl::parse(&entry.href).path_eq(&target))
                    .unwrap_or(false)
            }
            _ => self.prevent.same_url(href, &self.state.current.url),
        };

        if self_nav && !self.runner.has_self() {
            debug!(href, "same-page navigation, native behavior proceeds");
            return NavOutcome::Native;
        }

        if let Some(event) = event {
            self.doc.suppress_default(event);
        }

        self.page(href, trigger, self_nav).await
    }

    /// The navigation state machine.
    ///
    /// Overlapping attempts are not queued or merged: if a transition is
    /// already running the request degrades to a hard navigation and the
    /// state is left untouched. On failure the history cursor is rolled
    /// back and the state reset; the document keeps whatever the failed
    /// transition left behind.
    pub async fn page(&mut self, href: &str, trigger: Trigger, self_nav: bool) -> NavOutcome {
        if self.runner.is_running() {
            warn!(href, "transition already running, degrading to hard navigation");
            self.doc.hard_navigate(href);
            return NavOutcome::HardNavigate;
        }
        let span = info_span!("navigation", href, trigger = ?trigger);
        self.run_cycle(href, trigger, self_nav).instrument(span).await
    }

    async fn run_cycle(&mut self, href: &str, trigger: Trigger, self_nav: bool) -> NavOutcome {
        let Some(wrapper) = self.wrapper else {
            return self.fail(NavigationError::NotInitialized, false);
        };
        self.state.next = PageRecord::with_url(href);
        self.state.trigger = trigger;

        let page = self.lookup(href);

        // Wait barrier: resolution needs the next page's namespace.
        if self.runner.should_wait() {
            match page.clone().await {
                Ok(html) => {
                    self.state.next.namespace = markup::namespace_of(&html, &self.options.schema);
                    self.state.next.html = Some(html);
                }
                Err(err) => {
                    self.fetch_failed(href, &err, trigger);
                    return self.fail(NavigationError::Fetch(err), false);
                }
            }
        }

        let namespace = self.state.next.namespace.clone().unwrap_or_default();
        if trigger.is_history() {
            self.history.add(href, namespace);
        } else {
            self.history.push(href, namespace);
        }

        // Routing data may still be adjusted before the transition is chosen.
        self.hooks.emit(Hook::Page, &mut self.state);

        let criteria = Criteria {
            appear: false,
            self_nav,
        };
        let Some(transition) = self.runner.resolve(&self.state, &criteria) else {
            return self.fail(NavigationError::NoTransition, true);
        };

        let runner = self.runner.clone();
        let ctx = PageCtx {
            state: &self.state,
            page: page.clone(),
            transition,
            wrapper,
            doc: self.doc.as_ref(),
            schema: &self.options.schema,
        };
        let container = match runner.run_page(ctx).await {
            Ok(container) => container,
            Err(err) => {
                // A runner failure caused by the page future itself is a
                // fetch failure, not a choreography one.
                if let Some(Err(fetch_err)) = page.peek() {
                    let fetch_err = fetch_err.clone();
                    self.fetch_failed(href, &fetch_err, trigger);
                    return self.fail(NavigationError::Fetch(fetch_err), true);
                }
                return self.fail(NavigationError::Transition(err), true);
            }
        };

        let html = match page.await {
            Ok(html) => html,
            Err(err) => {
                self.fetch_failed(href, &err, trigger);
                return self.fail(NavigationError::Fetch(err), true);
            }
        };

        if let Some(title) = markup::title_of(&html) {
            self.doc.set_title(&title);
        }
        if self.state.next.namespace.is_none() {
            self.state.next.namespace = markup::namespace_of(&html, &self.options.schema);
        }
        self.state.next.html = Some(html);
        self.state.next.container = Some(container);
        self.state.commit();
        debug!(href, "navigation committed");
        self.hooks.emit(Hook::Reset, &mut self.state);
        NavOutcome::Completed
    }

    fn fail(&mut self, err: NavigationError, rollback: bool) -> NavOutcome {
        if rollback {
            self.history.cancel();
        }
        error!(error = %err, "navigation cycle failed");
        self.state.reset();
        self.hooks.emit(Hook::Reset, &mut self.state);
        NavOutcome::Failed
    }

    /// Cache lookup for a cycle's markup; a miss starts the fetch.
    fn lookup(&mut self, href: &str) -> PageFuture {
        if self.options.cache_pages {
            if let Some(hit) = self.cache.get(href) {
                debug!(href, "cache hit");
                return hit;
            }
        }
        let page = self.spawn_fetch(href);
        if self.options.cache_pages {
            self.cache.set(href, page.clone());
        }
        page
    }

    /// Wrap the fetch collaborator as a shared future. A failed href evicts
    /// its own cache entry so retry stays possible; what else the failure
    /// means is decided where the entry is consumed.
    fn spawn_fetch(&self, href: &str) -> PageFuture {
        let fetcher = self.fetcher.clone();
        let cache = self.cache.clone();
        let timeout = self.options.timeout;
        let href = href.to_string();
        async move {
            match fetcher.fetch(&href, timeout).await {
                Ok(body) => Ok(Arc::<str>::from(body)),
                Err(err) => {
                    debug!(href, error = %err, "fetch failed");
                    cache.delete(&href);
                    Err(err)
                }
            }
        }
        .boxed()
        .shared()
    }

    /// Request-error adapter, run when a navigation cycle consumes a failed
    /// fetch: the configured handler is consulted first, then a
    /// click-triggered failure degrades to native navigation. The cycle's
    /// own trigger decides, so a prefetched entry that fails still falls
    /// back correctly when a click lands on it.
    fn fetch_failed(&self, href: &str, err: &FetchError, trigger: Trigger) {
        let disposition = self
            .options
            .on_request_error
            .as_ref()
            .map(|handler| handler(&trigger, href, err))
            .unwrap_or(ErrorDisposition::UseDefault);
        if disposition == ErrorDisposition::UseDefault && trigger.is_element() {
            warn!(href, error = %err, "fetch failed, falling back to hard navigation");
            self.doc.hard_navigate(href);
        }
    }

    /// Dispatch a host event.
    pub async fn handle(&mut self, event: NavEvent) -> NavOutcome {
        match &event {
            NavEvent::LinkEnter(el) => {
                self.prefetch(*el);
                NavOutcome::Native
            }
            NavEvent::LinkClick(el) => {
                let Some(href) = self.doc.closest_href(*el) else {
                    return NavOutcome::Native;
                };
                if self.excluded(Some(*el), &href) {
                    debug!(href, "link excluded from interception");
                    return NavOutcome::Native;
                }
                self.go(&href, Trigger::Element(*el), Some(&event)).await
            }
            NavEvent::PopState(href) => {
                let href = href.clone();
                self.go(&href, Trigger::History, None).await
            }
        }
    }

    /// Pump the attached event source until it is exhausted or detached.
    pub async fn run(&mut self) {
        loop {
            let Some(source) = self.source.as_mut() else {
                break;
            };
            let Some(event) = source.next_event().await else {
                break;
            };
            self.handle(event).await;
        }
    }

    /// Speculatively warm the cache for a hovered/touched element.
    /// Failures never surface to the user.
    pub fn prefetch(&mut self, el: ElementRef) {
        if !(self.options.prefetch && self.options.cache_pages) {
            return;
        }
        let Some(href) = self.doc.closest_href(el) else {
            return;
        };
        if self.cache.has(&href) || self.excluded(Some(el), &href) {
            return;
        }
        debug!(href, "prefetching");
        let page = self.spawn_fetch(&href);
        self.cache.set(&href, page.clone());
        // Drive the shared future now; a later click only awaits the result.
        tokio::spawn(page);
    }

    /// Programmatic counterpart of [`Navigator::prefetch`].
    pub fn prefetch_href(&mut self, href: &str) {
        if !(self.options.prefetch && self.options.cache_pages) {
            return;
        }
        if self.cache.has(href) || self.excluded(None, href) {
            return;
        }
        let page = self.spawn_fetch(href);
        self.cache.set(href, page.clone());
        tokio::spawn(page);
    }

    fn excluded(&self, el: Option<ElementRef>, href: &str) -> bool {
        self.prevent.check(
            el,
            href,
            &self.state.current.url,
            self.doc.as_ref(),
            &self.options.schema,
        )
    }

    /// Install a plugin. Re-installing the same name warns and no-ops.
    pub fn use_plugin(&mut self, plugin: &dyn Plugin) -> Result<(), SetupError> {
        let name = plugin.name().to_string();
        if self.plugins.iter().any(|installed| *installed == name) {
            warn!(plugin = %name, "plugin already installed, skipping");
            return Ok(());
        }
        plugin.install(self).map_err(|source| SetupError::Plugin {
            name: name.clone(),
            source,
        })?;
        self.plugins.push(name);
        Ok(())
    }

    pub fn attach(&mut self, source: Box<dyn EventSource>) {
        self.source = Some(source);
    }

    pub fn is_bound(&self) -> bool {
        self.source.is_some()
    }

    /// Unbind the event source and clear every registry. The navigator can
    /// be re-initialized afterwards.
    pub fn teardown(&mut self) {
        self.source = None;
        self.hooks.clear();
        self.plugins.clear();
        self.cache.clear();
        self.history.clear();
        self.state.reset();
        info!("navigator torn down");
    }

    pub fn on(&mut self, hook: Hook, f: impl Fn(&mut NavigationState) + Send + Sync + 'static) {
        self.hooks.on(hook, f);
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn prevent_mut(&mut self) -> &mut PreventGuard {
        &mut self.prevent
    }

    pub fn plugins(&self) -> &[String] {
        &self.plugins
    }

    pub fn options(&self) -> &NavigatorOptions {
        &self.options
    }
}
