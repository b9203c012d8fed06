//! The conversion entry points.

use std::sync::OnceLock;

use tracing::debug;
use xast::Root;
use xast_optimizer::{OptimizeOptions, Optimizer, Pipeline, Plugin, PluginInfo};

use crate::error::{ConvertError, RenderError};
use crate::props::SvgProps;
use crate::render::render;
use crate::target::{Target, TargetStage};

/// Input for one conversion.
#[derive(Debug)]
pub struct ConversionRequest {
    /// Target name, checked against [`Target::ALL`].
    pub target: String,
    /// Path of the source, used in error messages and by path-aware stages.
    pub file: String,
    /// SVG source text.
    pub svg: String,
    /// Overrides for root elements.
    pub svg_props: Option<SvgProps>,
    /// Stages to run before the target stage.
    pub plugins: Vec<Box<dyn Plugin>>,
}

impl ConversionRequest {
    /// Creates a `react-dom` request with no overrides and no extra stages.
    pub fn new(file: impl Into<String>, svg: impl Into<String>) -> Self {
        Self {
            target: Target::default().as_str().to_string(),
            file: file.into(),
            svg: svg.into(),
            svg_props: None,
            plugins: Vec::new(),
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn with_svg_props(mut self, svg_props: SvgProps) -> Self {
        self.svg_props = Some(svg_props);
        self
    }

    pub fn with_plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    pub fn with_plugins(mut self, plugins: impl IntoIterator<Item = Box<dyn Plugin>>) -> Self {
        self.plugins.extend(plugins);
        self
    }
}

/// Output of a successful conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionResult {
    /// A single JSX expression.
    pub jsx: String,
    /// Capitalized tag names used by `jsx`, in first-use order.
    pub components: Vec<String>,
}

/// Converts SVG into JSX using an arbitrary [`Optimizer`].
#[derive(Debug, Clone, Default)]
pub struct Converter<O = Pipeline> {
    optimizer: O,
}

impl<O: Optimizer> Converter<O> {
    pub fn new(optimizer: O) -> Self {
        Self { optimizer }
    }

    /// Runs the optimizer with the request's stages followed by the target
    /// stage, then renders the tree as it stood after the last stage.
    pub fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult, ConvertError> {
        let target: Target = request.target.parse()?;
        debug!(file = %request.file, %target, plugins = request.plugins.len(), "converting");

        let target_stage = TargetStage::new(target);
        let capture = CaptureTree::default();

        let mut plugins: Vec<&dyn Plugin> = request.plugins.iter().map(|p| p.as_ref()).collect();
        plugins.push(&target_stage);
        plugins.push(&capture);

        // The returned tree is ignored; the captured one is the contract.
        self.optimizer
            .optimize(
                &request.svg,
                &OptimizeOptions {
                    path: Some(request.file.as_str()),
                    plugins,
                },
            )
            .map_err(ConvertError::Optimization)?;

        let root = capture
            .into_tree()
            .ok_or_else(|| ConvertError::render(RenderError::TreeNotCaptured, &request.file))?;

        let rendered = render(&root, request.svg_props.as_ref())
            .map_err(|err| ConvertError::render(err, &request.file))?;
        debug!(
            file = %request.file,
            bytes = rendered.jsx.len(),
            components = rendered.components.len(),
            "rendered"
        );

        Ok(ConversionResult {
            jsx: rendered.jsx,
            components: rendered.components,
        })
    }
}

/// Converts SVG into JSX with the default [`Pipeline`].
///
/// ```
/// use svgo_jsx::{convert, ConversionRequest};
///
/// let result = convert(&ConversionRequest::new(
///     "icon.svg",
///     r#"<svg fill-opacity="0.5"/>"#,
/// ))
/// .unwrap();
/// assert_eq!(result.jsx, r#"<svg fillOpacity="0.5" />"#);
/// ```
pub fn convert(request: &ConversionRequest) -> Result<ConversionResult, ConvertError> {
    Converter::new(Pipeline).convert(request)
}

/// Final stage that keeps a copy of the tree it sees.
#[derive(Debug, Default)]
struct CaptureTree {
    tree: OnceLock<Root>,
}

impl CaptureTree {
    fn into_tree(self) -> Option<Root> {
        self.tree.into_inner()
    }
}

impl Plugin for CaptureTree {
    fn name(&self) -> &str {
        "capture-tree"
    }

    fn apply(&self, root: &mut Root, _info: &PluginInfo<'_>) -> Result<(), String> {
        self.tree
            .set(root.clone())
            .map_err(|_| "stage ran more than once".to_string())
    }
}
