use glissade_core::state::NavigationState;

/// Broadcast points exposed to embedding code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    /// After initialization, with the freshly-built state.
    Ready,
    /// After history bookkeeping, before the transition is resolved.
    /// Listeners may still mutate routing data here.
    Page,
    /// Whenever the state returns to idle (commit or failure).
    Reset,
}

type HookFn = Box<dyn Fn(&mut NavigationState) + Send + Sync>;

/// Synchronous observer registry for the navigation lifecycle.
#[derive(Default)]
pub struct HookRegistry {
    ready: Vec<HookFn>,
    page: Vec<HookFn>,
    reset: Vec<HookFn>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, hook: Hook, f: impl Fn(&mut NavigationState) + Send + Sync + 'static) {
        self.slot(hook).push(Box::new(f));
    }

    pub fn emit(&self, hook: Hook, state: &mut NavigationState) {
        let listeners = match hook {
            Hook::Ready => &self.ready,
            Hook::Page => &self.page,
            Hook::Reset => &self.reset,
        };
        for listener in listeners {
            listener(state);
        }
    }

    pub fn clear(&mut self) {
        self.ready.clear();
        self.page.clear();
        self.reset.clear();
    }

    pub fn len(&self) -> usize {
        self.ready.len() + self.page.len() + self.reset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&mut self, hook: Hook) -> &mut Vec<HookFn> {
        match hook {
            Hook::Ready => &mut self.ready,
            Hook::Page => &mut self.page,
            Hook::Reset => &mut self.reset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glissade_core::page::PageRecord;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn emit_reaches_only_matching_listeners() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut hooks = HookRegistry::new();
        let counter = hits.clone();
        hooks.on(Hook::Page, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut state = NavigationState::new(PageRecord::with_url("/home"));
        hooks.emit(Hook::Ready, &mut state);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        hooks.emit(Hook::Page, &mut state);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn listeners_may_mutate_routing_data() {
        let mut hooks = HookRegistry::new();
        hooks.on(Hook::Page, |state| {
            state.next.namespace = Some("resolved".to_string());
        });
        let mut state = NavigationState::new(PageRecord::with_url("/home"));
        hooks.emit(Hook::Page, &mut state);
        assert_eq!(state.next.namespace.as_deref(), Some("resolved"));
    }

    #[test]
    fn clear_empties_every_slot() {
        let mut hooks = HookRegistry::new();
        hooks.on(Hook::Ready, |_| {});
        hooks.on(Hook::Reset, |_| {});
        assert_eq!(hooks.len(), 2);
        hooks.clear();
        assert!(hooks.is_empty());
    }
}
