//! Builds a [`Root`] from SVG source text.
//!
//! Tokenizing is delegated to `quick-xml`; this module only assembles the
//! event stream into a tree and records spans.

use crate::error::{ParseError, ParseErrorKind};
use crate::{Attributes, Cdata, Comment, Doctype, Element, Instruction, Node, Root, Span, Text};
use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::Reader;
use smol_str::SmolStr;
use std::borrow::Cow;
use text_size::TextSize;

/// Elements whose whitespace-only text is significant.
const TEXT_ELEMENTS: &[&str] = &[
    "altGlyph", "textPath", "tref", "tspan", "text", "title", "desc", "pre",
];

pub(crate) struct Parser<'a> {
    source: &'a str,
    reader: Reader<&'a [u8]>,
    stack: Vec<Element>,
    top_level: Vec<Node>,
    /// Number of open elements listed in [`TEXT_ELEMENTS`].
    text_depth: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        let mut reader = Reader::from_str(source);
        // End tags are matched against our own stack for better messages.
        reader.config_mut().check_end_names = false;

        Self {
            source,
            reader,
            stack: Vec::new(),
            top_level: Vec::new(),
            text_depth: 0,
        }
    }

    pub(crate) fn parse(mut self) -> Result<Root, ParseError> {
        loop {
            let start = self.position();
            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(err) => {
                    return Err(ParseError::new(
                        ParseErrorKind::Syntax {
                            message: err.to_string(),
                        },
                        self.reader.error_position() as usize,
                    ))
                }
            };
            let end = self.position();
            let span = Span::new(TextSize::from(start as u32), TextSize::from(end as u32));

            match event {
                Event::Start(tag) => {
                    let element = self.element(&tag, span, start)?;
                    if TEXT_ELEMENTS.contains(&element.name.as_str()) {
                        self.text_depth += 1;
                    }
                    self.stack.push(element);
                }
                Event::Empty(tag) => {
                    let element = self.element(&tag, span, start)?;
                    self.push(element.into());
                }
                Event::End(tag) => {
                    let name = String::from_utf8_lossy(tag.name().as_ref()).into_owned();
                    let mut element = match self.stack.pop() {
                        Some(open) if open.name == name => open,
                        _ => {
                            return Err(ParseError::new(
                                ParseErrorKind::UnexpectedClosingTag { tag_name: name },
                                start,
                            ))
                        }
                    };
                    if TEXT_ELEMENTS.contains(&element.name.as_str()) {
                        self.text_depth -= 1;
                    }
                    element.span.end = span.end;
                    self.push(element.into());
                }
                Event::Text(text) => {
                    let value = text.unescape().map_err(|err| {
                        ParseError::new(
                            ParseErrorKind::InvalidEscape {
                                message: err.to_string(),
                            },
                            start,
                        )
                    })?;
                    // Outside text content only the trimmed text is significant.
                    let value = if self.text_depth > 0 {
                        value.into_owned()
                    } else {
                        value.trim().to_string()
                    };
                    if self.text_depth > 0 || !value.is_empty() {
                        self.push(Text { span, value }.into());
                    }
                }
                Event::CData(data) => {
                    let value = String::from_utf8_lossy(&data).into_owned();
                    self.push(Cdata { span, value }.into());
                }
                Event::Comment(comment) => {
                    let value = String::from_utf8_lossy(&comment).trim().to_string();
                    self.push(Comment { span, value }.into());
                }
                Event::Decl(decl) => {
                    let value = declaration_value(&decl);
                    self.push(
                        Instruction {
                            span,
                            name: "xml".to_string(),
                            value,
                        }
                        .into(),
                    );
                }
                Event::PI(pi) => {
                    let name = String::from_utf8_lossy(pi.target()).into_owned();
                    let value = String::from_utf8_lossy(pi.content()).trim().to_string();
                    self.push(Instruction { span, name, value }.into());
                }
                Event::DocType(doctype) => {
                    let value = String::from_utf8_lossy(&doctype).trim().to_string();
                    self.push(Doctype { span, value }.into());
                }
                Event::Eof => break,
            }
        }

        if let Some(open) = self.stack.pop() {
            return Err(ParseError::new(
                ParseErrorKind::UnclosedTag {
                    tag_name: open.name.to_string(),
                },
                self.source.len(),
            ));
        }

        Ok(Root::new(self.top_level))
    }

    fn position(&self) -> usize {
        self.reader.buffer_position() as usize
    }

    fn push(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.top_level.push(node),
        }
    }

    fn element(&self, tag: &BytesStart<'_>, span: Span, offset: usize) -> Result<Element, ParseError> {
        let name = SmolStr::new(String::from_utf8_lossy(tag.name().as_ref()));
        let mut attributes = Attributes::new();

        for attr in tag.attributes() {
            let attr = attr.map_err(|err| {
                ParseError::new(
                    ParseErrorKind::InvalidAttribute {
                        message: err.to_string(),
                    },
                    offset,
                )
            })?;
            let key = SmolStr::new(String::from_utf8_lossy(attr.key.as_ref()));
            let value = attr.unescape_value().map_err(|err| {
                ParseError::new(
                    ParseErrorKind::InvalidEscape {
                        message: err.to_string(),
                    },
                    offset,
                )
            })?;
            attributes.insert(key, value.into_owned());
        }

        Ok(Element {
            span,
            name,
            attributes,
            children: Vec::new(),
        })
    }
}

/// Re-serializes the pseudo-attributes of an `<?xml ...?>` declaration.
fn declaration_value(decl: &BytesDecl<'_>) -> String {
    let mut parts = Vec::new();
    if let Ok(version) = decl.version() {
        parts.push(format!("version=\"{}\"", lossy(version)));
    }
    if let Some(Ok(encoding)) = decl.encoding() {
        parts.push(format!("encoding=\"{}\"", lossy(encoding)));
    }
    if let Some(Ok(standalone)) = decl.standalone() {
        parts.push(format!("standalone=\"{}\"", lossy(standalone)));
    }
    parts.join(" ")
}

fn lossy(bytes: Cow<'_, [u8]>) -> String {
    String::from_utf8_lossy(&bytes).into_owned()
}
