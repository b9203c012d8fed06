//! Staged transform pipeline over SVG trees.
//!
//! An [`Optimizer`] takes SVG source text and an ordered list of
//! [`Plugin`] stages, and returns the final tree or a plain-text error. The
//! default implementation, [`Pipeline`], parses with [`xast::parse`] and runs
//! the stages in order.
//!
//! # Example
//!
//! ```
//! use xast_optimizer::{builtin, plugin_fn, OptimizeOptions, Optimizer, Pipeline};
//!
//! let preset = builtin::resolve_name("preset-default").unwrap();
//! let count = plugin_fn("count", |root, _| {
//!     assert_eq!(root.children.len(), 1);
//!     Ok(())
//! });
//!
//! let mut plugins: Vec<&dyn xast_optimizer::Plugin> = preset.iter().map(|p| p.as_ref()).collect();
//! plugins.push(&count);
//!
//! let root = Pipeline
//!     .optimize(
//!         "<!-- generated --><svg/>",
//!         &OptimizeOptions { path: Some("icon.svg"), plugins },
//!     )
//!     .unwrap();
//! assert_eq!(root.children.len(), 1);
//! ```

pub mod builtin;
mod plugin;

pub use builtin::PluginSpec;
pub use plugin::{plugin_fn, FnPlugin, Plugin, PluginInfo};

use tracing::debug;
use xast::Root;

/// Options for a single optimizer run.
#[derive(Default)]
pub struct OptimizeOptions<'a> {
    /// Path of the source document, used in error messages and by stages
    /// that derive names from it.
    pub path: Option<&'a str>,
    /// Stages to run, in order.
    pub plugins: Vec<&'a dyn Plugin>,
}

/// Turns SVG source text into a final tree.
///
/// Every stage in [`OptimizeOptions::plugins`] is applied exactly once, in
/// order. Failures are reported as plain text and abort the run.
pub trait Optimizer {
    /// Runs the pipeline over `source`.
    fn optimize(&self, source: &str, options: &OptimizeOptions<'_>) -> Result<Root, String>;
}

/// The default optimizer: parse, then apply each stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline;

impl Optimizer for Pipeline {
    fn optimize(&self, source: &str, options: &OptimizeOptions<'_>) -> Result<Root, String> {
        let mut root = xast::parse(source).map_err(|err| err.display_with_path(options.path, source))?;

        let info = PluginInfo { path: options.path };
        for plugin in &options.plugins {
            debug!(plugin = plugin.name(), path = ?options.path, "applying stage");
            plugin
                .apply(&mut root, &info)
                .map_err(|err| format!("{}: {}", plugin.name(), err))?;
        }

        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stages_run_in_order() {
        let first = plugin_fn("first", |root, _| {
            root.children.push(xast::Comment::new("first").into());
            Ok(())
        });
        let second = plugin_fn("second", |root, _| {
            assert_eq!(root.children.len(), 2);
            root.children.push(xast::Comment::new("second").into());
            Ok(())
        });

        let root = Pipeline
            .optimize(
                "<svg/>",
                &OptimizeOptions {
                    path: None,
                    plugins: vec![&first, &second],
                },
            )
            .unwrap();
        assert_eq!(root.children.len(), 3);
    }

    #[test]
    fn test_parse_error_includes_path() {
        let err = Pipeline
            .optimize(
                "<svg>",
                &OptimizeOptions {
                    path: Some("./test.svg"),
                    plugins: Vec::new(),
                },
            )
            .unwrap_err();
        assert_eq!(err, "./test.svg:1:6: unclosed tag: <svg>");
    }

    #[test]
    fn test_stage_error_aborts() {
        let failing = plugin_fn("failing", |_, _| Err("boom".to_string()));
        let never = plugin_fn("never", |_, _| panic!("must not run"));
        let err = Pipeline
            .optimize(
                "<svg/>",
                &OptimizeOptions {
                    path: None,
                    plugins: vec![&failing, &never],
                },
            )
            .unwrap_err();
        assert_eq!(err, "failing: boom");
    }

    #[test]
    fn test_stage_sees_path() {
        let check = plugin_fn("check", |_, info| {
            assert_eq!(info.path, Some("icons/cog.svg"));
            Ok(())
        });
        Pipeline
            .optimize(
                "<svg/>",
                &OptimizeOptions {
                    path: Some("icons/cog.svg"),
                    plugins: vec![&check],
                },
            )
            .unwrap();
    }
}
