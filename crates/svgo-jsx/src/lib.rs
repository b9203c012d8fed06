//! SVG to JSX conversion.
//!
//! This crate turns an SVG document into a JSX expression for one of several
//! targets:
//! - `react-dom`: presentation attributes in camelCase (`fillOpacity`)
//! - `preact`: attribute names as written in SVG
//! - `react-native-svg`: elements mapped to `react-native-svg` components,
//!   unsupported elements dropped
//! - `custom`: no renaming, for callers that bring their own stages
//!
//! The document goes through an [`Optimizer`](xast_optimizer::Optimizer)
//! first. Caller stages run, then the target stage, and the tree that comes
//! out is rendered.
//!
//! # Example
//!
//! ```
//! use svgo_jsx::{convert, ConversionRequest, SvgProps};
//!
//! let mut svg_props = SvgProps::new();
//! svg_props.insert("width".to_string(), Some("{size}".to_string()));
//!
//! let request = ConversionRequest::new(
//!     "icon.svg",
//!     r#"<svg width="24" height="24"><path style="fill:#000"/></svg>"#,
//! )
//! .with_svg_props(svg_props);
//!
//! let result = convert(&request).unwrap();
//! assert_eq!(
//!     result.jsx,
//!     r##"<svg height="24" width={size}><path style={{"fill":"#000"}} /></svg>"##
//! );
//! ```

mod convert;
mod error;
pub mod mappings;
mod props;
mod render;
pub mod style;
mod target;

pub use convert::{convert, ConversionRequest, ConversionResult, Converter};
pub use error::{ConvertError, RenderError};
pub use props::{Emission, Props, SvgProps};
pub use render::{render, Rendered};
pub use target::{Target, TargetStage};
