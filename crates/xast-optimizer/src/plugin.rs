//! The stage contract.

use std::fmt;
use xast::Root;

/// Context handed to every stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct PluginInfo<'a> {
    /// Path of the document being optimized, if known.
    pub path: Option<&'a str>,
}

/// A named tree transform stage.
pub trait Plugin {
    /// The stage name, used in logs and error messages.
    fn name(&self) -> &str;

    /// Transforms the tree in place.
    fn apply(&self, root: &mut Root, info: &PluginInfo<'_>) -> Result<(), String>;
}

impl fmt::Debug for dyn Plugin + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Plugin").field(&self.name()).finish()
    }
}

/// A stage backed by a closure. See [`plugin_fn`].
pub struct FnPlugin<F> {
    name: String,
    f: F,
}

/// Wraps a closure as a named stage.
pub fn plugin_fn<F>(name: impl Into<String>, f: F) -> FnPlugin<F>
where
    F: Fn(&mut Root, &PluginInfo<'_>) -> Result<(), String>,
{
    FnPlugin {
        name: name.into(),
        f,
    }
}

impl<F> Plugin for FnPlugin<F>
where
    F: Fn(&mut Root, &PluginInfo<'_>) -> Result<(), String>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, root: &mut Root, info: &PluginInfo<'_>) -> Result<(), String> {
        (self.f)(root, info)
    }
}
