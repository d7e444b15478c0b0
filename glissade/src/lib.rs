//! Glissade facade crate.
//!
//! Re-exports core contracts, the runtime orchestrator, and the default
//! collaborators with a single entry point.

pub use glissade_core as core;
pub use glissade_kit as kit;
pub use glissade_runtime as runtime;

pub use glissade_core::{
    AttributeSchema, Document, ElementRef, EventSource, FetchError, Fetcher, NavEvent,
    NavigationState, PageCache, Trigger,
};
pub use glissade_kit::{HttpFetcher, MemoryCache, TransitionDefinition, TransitionStore, View};
pub use glissade_runtime::{Hook, NavOutcome, Navigator, NavigatorOptions, Plugin};

pub mod prelude {
    pub use glissade_core::{
        AttributeSchema, Document, ElementRef, ErrorDisposition, EventSource, FetchError, Fetcher,
        NavEvent, NavigationError, NavigationState, PageCache, PageFuture, PageRecord, SetupError,
        Trigger, ready_page,
    };
    pub use glissade_kit::{
        HttpFetcher, MemoryCache, Phase, PhaseHook, RouteRule, TransitionDefinition,
        TransitionStore, View,
    };
    pub use glissade_runtime::prelude::*;
}
