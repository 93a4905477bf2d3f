//! Validation setup errors
//!
//! Invalid user input is never an error here; it is field state. These
//! variants cover misconfiguration and DOM misuse only.

use formgate_dom::{DomError, SelectorError};

/// Errors raised while configuring or wiring validation
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("failed to read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("invalid configuration JSON: {0}")]
    ConfigJson(#[from] serde_json::Error),

    #[error("configuration option `{option}` is empty")]
    EmptyOption { option: &'static str },

    #[error("configuration option `{option}` is not a valid selector: {source}")]
    InvalidSelector {
        option: &'static str,
        #[source]
        source: SelectorError,
    },

    #[error("configuration option `{option}` is not a single class name: {value:?}")]
    InvalidClassName { option: &'static str, value: String },

    #[error(transparent)]
    Dom(#[from] DomError),
}

pub type Result<T> = std::result::Result<T, ValidationError>;
