//! formgate
//!
//! Live form validation with submit-button gating.
//!
//! Given a [`ValidationConfig`], [`enable_validation`] finds every matching
//! form in a [`Document`], suppresses its native submission, disables its
//! submit button and re-validates each input as the user types. Invalid
//! fields get an error class and their validation message is written into
//! the element with id `{input-id}-error`. [`clear_validation`] resets a
//! form to a clean, disabled state, e.g. when a dialog is reopened.
//!
//! # Example
//! ```rust,ignore
//! use formgate::{ValidationConfig, enable_validation};
//!
//! let mut doc = formgate_html::parse(PAGE)?;
//! enable_validation(&mut doc, &ValidationConfig::default())?;
//! let name = doc.get_element_by_id("profile-name").unwrap();
//! doc.user_input(name, "Jacques Cousteau")?;
//! ```

pub mod config;
mod error;
pub mod rules;
mod validator;

pub use config::{Selectors, ValidationConfig};
pub use error::{Result, ValidationError};
pub use formgate_dom::{Document, NodeId};
pub use validator::{
    ButtonState, FieldBinding, FormBinding, FormValidator, clear_validation, enable_validation,
};
