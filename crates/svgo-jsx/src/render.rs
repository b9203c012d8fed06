//! JSX text emission.
//!
//! Rendering never mutates the tree. Everything that varies by target has
//! already been applied by [`TargetStage`](crate::target::TargetStage), so
//! this module only decides layout and quoting.

use indexmap::IndexSet;
use xast::{Element, Node, Root};

use crate::error::RenderError;
use crate::props::{json_string, Props, SvgProps};

/// Output of [`render`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub jsx: String,
    /// Capitalized tag names in first-use order.
    pub components: Vec<String>,
}

/// State shared by one rendering pass.
struct RenderContext<'a> {
    svg_props: Option<&'a SvgProps>,
    components: IndexSet<String>,
}

/// Renders a final tree as a single JSX expression.
///
/// `svg_props` are applied to every element directly under the root.
pub fn render(root: &Root, svg_props: Option<&SvgProps>) -> Result<Rendered, RenderError> {
    let mut cx = RenderContext {
        svg_props,
        components: IndexSet::new(),
    };

    let mut parts = Vec::with_capacity(root.children.len());
    for child in &root.children {
        let text = render_node(child, true, &mut cx)?;
        if !text.is_empty() {
            parts.push(text);
        }
    }

    let jsx = match parts.as_slice() {
        [single] => single.clone(),
        _ => format!("<>{}</>", parts.concat()),
    };

    Ok(Rendered {
        jsx,
        components: cx.components.into_iter().collect(),
    })
}

fn render_node(node: &Node, top_level: bool, cx: &mut RenderContext<'_>) -> Result<String, RenderError> {
    match node {
        Node::Element(element) => render_element(element, top_level, cx),
        Node::Text(text) => Ok(literal(&text.value)),
        Node::Cdata(cdata) => Ok(literal(&cdata.value)),
        Node::Comment(comment) => Ok(format!("{{/* {} */}}", comment.value.replace("*/", "* /"))),
        Node::Doctype(_) | Node::Instruction(_) => Ok(String::new()),
    }
}

fn render_element(
    element: &Element,
    top_level: bool,
    cx: &mut RenderContext<'_>,
) -> Result<String, RenderError> {
    let tag = element.name.as_str();
    if tag.is_empty() {
        return Err(RenderError::EmptyTagName);
    }
    if let Some(name) = element.attributes.keys().find(|name| !is_valid_attribute_name(name)) {
        return Err(RenderError::InvalidAttributeName {
            tag: tag.to_string(),
            name: name.to_string(),
        });
    }
    if tag.starts_with(|c: char| c.is_ascii_uppercase()) {
        cx.components.insert(tag.to_string());
    }

    let overrides = if top_level { cx.svg_props } else { None };
    let props = Props::compose(element, overrides);

    let mut out = String::new();
    out.push('<');
    out.push_str(tag);
    props.write_to(&mut out);

    if element.children.is_empty() {
        out.push_str(" />");
        return Ok(out);
    }

    out.push('>');
    for child in &element.children {
        out.push_str(&render_node(child, false, cx)?);
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
    Ok(out)
}

fn literal(value: &str) -> String {
    format!("{{{}}}", json_string(value))
}

fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace() || matches!(c, '"' | '\'' | '=' | '<' | '>' | '/' | '{' | '}')
        })
}
