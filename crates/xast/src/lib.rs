//! XML abstract syntax tree for SVG documents.
//!
//! This crate provides:
//! - Tree types for elements, text, comments and the other XML node kinds
//! - A parser backed by `quick-xml` that preserves attribute order
//! - A mutable visitor for transform stages that rename or drop elements
//!
//! # Example
//!
//! ```
//! use xast::{parse, visit_elements_mut, VisitAction};
//!
//! let mut root = parse(r#"<svg width="24"><circle r="10"/></svg>"#).unwrap();
//! visit_elements_mut(&mut root, |el| {
//!     el.name = el.name.to_uppercase().into();
//!     VisitAction::Keep
//! });
//! assert_eq!(root.elements().next().unwrap().name, "SVG");
//! ```

mod ast;
mod error;
mod parser;
mod span;
mod visit;

pub use ast::*;
pub use error::{ParseError, ParseErrorKind};
pub use span::{ByteOffset, LineCol, LineIndex, Span};
pub use visit::{retain_nodes, visit_elements_mut, VisitAction};

/// Parses SVG source text into a tree.
///
/// Whitespace-only text is dropped unless it sits inside a text-content
/// element such as `<text>` or `<tspan>`.
pub fn parse(source: &str) -> Result<Root, ParseError> {
    parser::Parser::new(source).parse()
}
