use thiserror::Error;

use crate::fetch::FetchError;

/// Fatal configuration and startup failures. These abort initialization
/// and are expected to propagate to the embedding application.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no navigable wrapper found in the document")]
    MissingWrapper,
    #[error("wrapper has no initial container")]
    MissingContainer,
    #[error("invalid prevent rule: {0}")]
    PreventRule(String),
    #[error("plugin {name} failed to install")]
    Plugin {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Recoverable failures of a single navigation cycle. Caught at the
/// orchestrator boundary: logged, history rolled back, state reset.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("transition failed")]
    Transition(#[source] anyhow::Error),
    #[error("no transition resolved for this navigation")]
    NoTransition,
    #[error("navigator has not been initialized")]
    NotInitialized,
}
