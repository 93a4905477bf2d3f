//! DOM error types

use crate::NodeId;

/// Errors raised by DOM operations
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("node {0} does not exist")]
    NodeNotFound(NodeId),

    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    #[error("node {0} is not a form control")]
    NotAFormControl(NodeId),

    #[error(transparent)]
    Selector(#[from] SelectorError),
}

/// Selector syntax errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected character {found:?} at offset {offset} in {selector:?}")]
    UnexpectedChar {
        selector: String,
        offset: usize,
        found: char,
    },

    #[error("unterminated attribute selector in {0:?}")]
    UnterminatedAttribute(String),

    #[error("unsupported combinator {combinator:?} in {selector:?}")]
    UnsupportedCombinator { selector: String, combinator: char },
}
