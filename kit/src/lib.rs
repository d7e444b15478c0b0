//! Batteries for Glissade.
//!
//! Default implementations of the core collaborator contracts: an in-memory
//! page cache, an HTTP fetcher, and a registry-backed transition runner.

pub mod cache;
pub mod fetcher;
pub mod store;

pub use cache::MemoryCache;
pub use fetcher::HttpFetcher;
pub use store::{Phase, PhaseHook, RouteRule, TransitionDefinition, TransitionStore, View};
