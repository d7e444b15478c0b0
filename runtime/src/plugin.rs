use crate::navigator::Navigator;

/// An installable extension.
///
/// Plugins register hooks or prevent rules during `install`; the navigator
/// tracks installed names and ignores duplicate installs.
pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;

    fn install(&self, navigator: &mut Navigator) -> anyhow::Result<()>;
}
