//! Opt-in tracing setup.

use tracing_subscriber::EnvFilter;

/// Install a global subscriber with the given filter directive.
///
/// Does nothing if a subscriber is already set, so embedding applications
/// with their own tracing setup keep it.
pub fn init(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
