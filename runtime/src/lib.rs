pub mod hooks;
pub mod logging;
pub mod navigator;
pub mod options;
pub mod plugin;

pub use hooks::{Hook, HookRegistry};
pub use navigator::{NavOutcome, Navigator};
pub use options::NavigatorOptions;
pub use plugin::Plugin;

pub mod prelude {
    pub use crate::hooks::Hook;
    pub use crate::navigator::{NavOutcome, Navigator};
    pub use crate::options::NavigatorOptions;
    pub use crate::plugin::Plugin;
}
