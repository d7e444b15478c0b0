use crate::dom::ElementRef;
use crate::page::PageRecord;

/// What caused a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trigger {
    /// Programmatic call through the public API.
    #[default]
    Programmatic,
    /// Browser history traversal (back/forward replay).
    History,
    /// User interaction on a concrete element.
    Element(ElementRef),
}

impl Trigger {
    pub fn is_history(&self) -> bool {
        matches!(self, Trigger::History)
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Trigger::Element(_))
    }
}

/// The single mutable "current page" record of the orchestrator.
///
/// Holds exactly two [`PageRecord`]s: the page visibly active in the
/// document and the page under construction for an in-flight navigation.
/// The orchestrator owns this exclusively; collaborators only ever see
/// borrowed snapshots.
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    pub current: PageRecord,
    /// Empty between cycles.
    pub next: PageRecord,
    pub trigger: Trigger,
}

impl NavigationState {
    pub fn new(current: PageRecord) -> Self {
        Self {
            current,
            next: PageRecord::empty(),
            trigger: Trigger::default(),
        }
    }

    /// No navigation in flight.
    pub fn is_idle(&self) -> bool {
        self.next.is_empty()
    }

    /// Promote `next` to `current` at the end of a successful cycle.
    pub fn commit(&mut self) {
        self.current = std::mem::take(&mut self.next);
        self.trigger = Trigger::default();
    }

    /// Abandon the in-flight record after a failed cycle.
    pub fn reset(&mut self) {
        self.next = PageRecord::empty();
        self.trigger = Trigger::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_promotes_next() {
        let mut state = NavigationState::new(PageRecord::with_url("/home"));
        state.next = PageRecord::with_url("/about");
        state.trigger = Trigger::History;
        assert!(!state.is_idle());

        state.commit();
        assert_eq!(state.current.url.path, "/about");
        assert!(state.is_idle());
        assert_eq!(state.trigger, Trigger::Programmatic);
    }

    #[test]
    fn reset_keeps_current() {
        let mut state = NavigationState::new(PageRecord::with_url("/home"));
        state.next = PageRecord::with_url("/about");
        state.reset();
        assert_eq!(state.current.url.path, "/home");
        assert!(state.is_idle());
    }
}
