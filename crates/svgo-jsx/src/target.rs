//! Output targets and the stage that adapts a tree to one.

use std::fmt;
use std::mem;
use std::str::FromStr;

use smol_str::SmolStr;
use tracing::trace;
use xast::{visit_elements_mut, Attributes, Element, Root, VisitAction};
use xast_optimizer::{Plugin, PluginInfo};

use crate::error::ConvertError;
use crate::mappings::{preact_attribute, react_dom_attribute, react_native_svg_element};

/// The JSX dialect to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Target {
    /// React DOM: camelCase presentation attributes.
    #[default]
    ReactDom,
    /// Preact: attribute names as written in SVG.
    Preact,
    /// `react-native-svg` components.
    ReactNativeSvg,
    /// No renaming at all.
    Custom,
}

impl Target {
    /// Every target, in the order used by error messages.
    pub const ALL: [Target; 4] = [
        Target::ReactDom,
        Target::Preact,
        Target::ReactNativeSvg,
        Target::Custom,
    ];

    /// The name used on the command line and in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Target::ReactDom => "react-dom",
            Target::Preact => "preact",
            Target::ReactNativeSvg => "react-native-svg",
            Target::Custom => "custom",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Target::ALL
            .into_iter()
            .find(|target| target.as_str() == s)
            .ok_or_else(|| ConvertError::invalid_target(s))
    }
}

/// Stage that renames tags and attributes for a [`Target`].
///
/// Runs after all caller-supplied stages so their output is adapted too.
#[derive(Debug, Clone, Copy)]
pub struct TargetStage {
    target: Target,
}

impl TargetStage {
    pub fn new(target: Target) -> Self {
        Self { target }
    }
}

impl Plugin for TargetStage {
    fn name(&self) -> &str {
        "target"
    }

    fn apply(&self, root: &mut Root, _info: &PluginInfo<'_>) -> Result<(), String> {
        match self.target {
            Target::ReactDom => visit_elements_mut(root, |element| {
                rename_attributes(element, |name| Some(react_dom_attribute(name)));
                VisitAction::Keep
            }),
            Target::Preact => visit_elements_mut(root, |element| {
                rename_attributes(element, preact_attribute);
                VisitAction::Keep
            }),
            Target::ReactNativeSvg => visit_elements_mut(root, |element| {
                let Some(component) = react_native_svg_element(&element.name) else {
                    trace!(tag = %element.name, "dropping element unsupported by react-native-svg");
                    return VisitAction::Remove;
                };
                element.name = SmolStr::new_static(component);
                rename_attributes(element, |name| Some(react_dom_attribute(name)));
                VisitAction::Keep
            }),
            Target::Custom => {}
        }
        Ok(())
    }
}

/// Rebuilds the attribute map through `rename`, dropping names it rejects.
///
/// When two names collapse into one, the later value wins and keeps the
/// position of the first.
fn rename_attributes<F>(element: &mut Element, mut rename: F)
where
    F: FnMut(&str) -> Option<SmolStr>,
{
    let original = mem::take(&mut element.attributes);
    let mut renamed = Attributes::with_capacity(original.len());
    for (name, value) in original {
        if let Some(new_name) = rename(&name) {
            renamed.insert(new_name, value);
        }
    }
    element.attributes = renamed;
}
