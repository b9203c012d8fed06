//! Error types.

use thiserror::Error;

use crate::target::Target;

/// Why a conversion failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConvertError {
    /// The requested target is not one of [`Target::ALL`].
    #[error("Target \"{target}\" is not valid. Use one of the following: {valid}.")]
    InvalidTarget { target: String, valid: String },

    /// The optimizer failed; its message is passed through unchanged.
    #[error("{0}")]
    Optimization(String),

    /// The final tree could not be rendered.
    #[error("{message}\nin {file}")]
    Render { message: String, file: String },
}

impl ConvertError {
    pub(crate) fn invalid_target(target: &str) -> Self {
        let valid: Vec<&str> = Target::ALL.iter().map(|t| t.as_str()).collect();
        ConvertError::InvalidTarget {
            target: target.to_string(),
            valid: valid.join(", "),
        }
    }

    pub(crate) fn render(err: RenderError, file: &str) -> Self {
        ConvertError::Render {
            message: err.to_string(),
            file: file.to_string(),
        }
    }
}

/// A tree that cannot be written as JSX.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("Element has an empty tag name")]
    EmptyTagName,

    #[error("Attribute name {name:?} on <{tag}> cannot be written in JSX")]
    InvalidAttributeName { tag: String, name: String },

    #[error("Optimizer finished without passing the final tree to the extraction stage")]
    TreeNotCaptured,
}
