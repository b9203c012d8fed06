//! Tree types for parsed SVG documents.
//!
//! The tree is a closed set of node kinds. Stages that transform the tree
//! mutate it in place; renderers only ever borrow it.

use crate::Span;
use indexmap::IndexMap;
use smol_str::SmolStr;

/// Attribute name → value, in declaration order.
pub type Attributes = IndexMap<SmolStr, String>;

/// The document root.
///
/// Holds everything at the top level of the document: the XML declaration,
/// the doctype, comments and (usually) a single `<svg>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Root {
    /// The top-level nodes.
    pub children: Vec<Node>,
}

impl Root {
    /// Creates a root from its top-level nodes.
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// Returns the top-level elements.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }
}

/// A node below the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element such as `<path d="..."/>`.
    Element(Element),
    /// Character data.
    Text(Text),
    /// A `<![CDATA[...]]>` section.
    Cdata(Cdata),
    /// A `<!-- ... -->` comment.
    Comment(Comment),
    /// A `<!DOCTYPE ...>` declaration.
    Doctype(Doctype),
    /// A processing instruction, including the `<?xml ...?>` declaration.
    Instruction(Instruction),
}

impl Node {
    /// Returns the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Returns the element mutably if this node is one.
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }
}

/// An element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// The span of the element, from `<` of the start tag to `>` of the end tag.
    pub span: Span,
    /// The tag name, including a namespace prefix if present.
    pub name: SmolStr,
    /// The attributes.
    pub attributes: Attributes,
    /// The child nodes.
    pub children: Vec<Node>,
}

impl Element {
    /// Creates an element with no attributes or children.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Adds an attribute, replacing the value of an existing one in place.
    pub fn with_attribute(mut self, name: impl Into<SmolStr>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Appends a child node.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Returns the value of an attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Character data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text {
    pub span: Span,
    /// The unescaped text.
    pub value: String,
}

/// A CDATA section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cdata {
    pub span: Span,
    /// The raw section content.
    pub value: String,
}

/// A comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    pub span: Span,
    /// The comment text between `<!--` and `-->`, trimmed.
    pub value: String,
}

/// A doctype declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Doctype {
    pub span: Span,
    /// Everything after `<!DOCTYPE`.
    pub value: String,
}

/// A processing instruction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Instruction {
    pub span: Span,
    /// The target, e.g. `xml` or `xml-stylesheet`.
    pub name: String,
    /// The remainder of the instruction.
    pub value: String,
}

macro_rules! impl_into_node {
    ($($ty:ident),*) => {
        $(
            impl From<$ty> for Node {
                fn from(node: $ty) -> Self {
                    Node::$ty(node)
                }
            }
        )*
    };
}

impl_into_node!(Element, Text, Cdata, Comment, Doctype, Instruction);

impl Text {
    /// Creates a text node that was not parsed from source.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            span: Span::default(),
            value: value.into(),
        }
    }
}

impl Comment {
    /// Creates a comment node that was not parsed from source.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            span: Span::default(),
            value: value.into(),
        }
    }
}

impl Cdata {
    /// Creates a CDATA node that was not parsed from source.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            span: Span::default(),
            value: value.into(),
        }
    }
}
