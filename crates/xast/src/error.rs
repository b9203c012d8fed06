//! Parse error types.

use crate::{LineCol, LineIndex};
use thiserror::Error;

/// An error that occurred while reading SVG source text.
#[derive(Debug, Clone, Error)]
#[error("{kind}")]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Byte offset in the source where the error was detected.
    pub offset: usize,
}

impl ParseError {
    /// Creates a new parse error.
    pub fn new(kind: ParseErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// Resolves the error offset against the source it came from.
    pub fn line_col(&self, source: &str) -> LineCol {
        LineIndex::new(source).line_col(source, self.offset)
    }

    /// Formats the error as `{path}:{line}:{column}: {message}`.
    pub fn display_with_path(&self, path: Option<&str>, source: &str) -> String {
        let LineCol { line, column } = self.line_col(source);
        format!("{}:{}:{}: {}", path.unwrap_or("<input>"), line, column, self.kind)
    }
}

/// The kind of parse error.
#[derive(Debug, Clone, Error)]
pub enum ParseErrorKind {
    /// The underlying XML reader rejected the input.
    #[error("{message}")]
    Syntax {
        /// The reader's description of the problem.
        message: String,
    },

    /// An element was still open at the end of input.
    #[error("unclosed tag: <{tag_name}>")]
    UnclosedTag {
        /// The name of the unclosed element.
        tag_name: String,
    },

    /// A closing tag had no matching start tag.
    #[error("unexpected closing tag: </{tag_name}>")]
    UnexpectedClosingTag {
        /// The name in the closing tag.
        tag_name: String,
    },

    /// An attribute was malformed or declared twice.
    #[error("invalid attribute: {message}")]
    InvalidAttribute {
        /// A description of the problem.
        message: String,
    },

    /// Text or an attribute value contained an unknown entity reference.
    #[error("invalid escape: {message}")]
    InvalidEscape {
        /// A description of the problem.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ParseError::new(
            ParseErrorKind::UnclosedTag {
                tag_name: "svg".to_string(),
            },
            0,
        );
        assert_eq!(error.to_string(), "unclosed tag: <svg>");
    }

    #[test]
    fn test_display_with_path() {
        let source = "<svg>\n  <g>\n</svg>";
        let error = ParseError::new(
            ParseErrorKind::UnexpectedClosingTag {
                tag_name: "svg".to_string(),
            },
            12,
        );
        assert_eq!(
            error.display_with_path(Some("icons/cog.svg"), source),
            "icons/cog.svg:3:1: unexpected closing tag: </svg>"
        );
        assert_eq!(
            error.display_with_path(None, source),
            "<input>:3:1: unexpected closing tag: </svg>"
        );
    }
}
