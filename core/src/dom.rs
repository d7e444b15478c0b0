use serde::{Deserialize, Serialize};

use crate::event::NavEvent;

/// Opaque handle to a host document element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef(pub u64);

/// The host document surface.
///
/// Glissade never touches a real DOM. The embedding application implements
/// this trait over whatever document technology it runs on; the orchestrator
/// drives it through these operations only.
pub trait Document: Send + Sync {
    /// Locate the navigable root ("wrapper").
    fn wrapper(&self) -> Option<ElementRef>;

    /// The wrapper's current container element, if any.
    fn container(&self, wrapper: ElementRef) -> Option<ElementRef>;

    /// Serialized markup of an element.
    fn outer_html(&self, el: ElementRef) -> String;

    /// The document's present address.
    fn current_href(&self) -> String;

    /// Walk up from `el` to the nearest ancestor exposing a resolvable
    /// href, returning that href.
    fn closest_href(&self, el: ElementRef) -> Option<String>;

    /// Read an attribute from an element.
    fn attribute(&self, el: ElementRef, name: &str) -> Option<String>;

    /// Mark the wrapper as a live region for assistive technology.
    fn mark_live_region(&self, wrapper: ElementRef);

    /// Set the document title.
    fn set_title(&self, title: &str);

    /// Stop propagation and prevent the default action of the host event
    /// behind `event`.
    fn suppress_default(&self, event: &NavEvent);

    /// Splice `html` in as the wrapper's container, returning the new live
    /// container element. The previous container is the host's to discard.
    fn replace_container(&self, wrapper: ElementRef, html: &str) -> ElementRef;

    /// Abandon the async path: full native navigation to `href`.
    fn hard_navigate(&self, href: &str);
}
