//! Validation Configuration

use std::path::Path;

use formgate_dom::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// Selectors and class names that drive validation.
///
/// Field names follow the camelCase keys of the JSON form, so a config
/// object written for a page script deserializes unchanged. Missing keys
/// fall back to the popup-form defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationConfig {
    /// Which elements are validated forms
    pub form_selector: String,
    /// Which descendants of a form are validated inputs
    pub input_selector: String,
    /// Which descendant of a form is its submit control
    pub submit_button_selector: String,
    /// Class applied while the submit button is disabled
    pub inactive_button_class: String,
    /// Class applied to an invalid input
    pub input_error_class: String,
    /// Class applied to the visible error-message element
    pub error_class: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            form_selector: ".popup__form".to_string(),
            input_selector: ".popup__input".to_string(),
            submit_button_selector: ".popup__button".to_string(),
            inactive_button_class: "popup__button_disabled".to_string(),
            input_error_class: "popup__input_type_error".to_string(),
            error_class: "popup__error_visible".to_string(),
        }
    }
}

/// Parsed selectors of a checked configuration
#[derive(Debug, Clone)]
pub struct Selectors {
    pub form: Selector,
    pub input: Selector,
    pub submit_button: Selector,
}

impl ValidationConfig {
    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }

    /// Check every option and parse the selectors.
    ///
    /// A selector that parses but matches nothing is not an error.
    pub fn compile(&self) -> Result<Selectors> {
        let selectors = Selectors {
            form: parse_selector("formSelector", &self.form_selector)?,
            input: parse_selector("inputSelector", &self.input_selector)?,
            submit_button: parse_selector("submitButtonSelector", &self.submit_button_selector)?,
        };
        check_class("inactiveButtonClass", &self.inactive_button_class)?;
        check_class("inputErrorClass", &self.input_error_class)?;
        check_class("errorClass", &self.error_class)?;
        Ok(selectors)
    }
}

fn parse_selector(option: &'static str, value: &str) -> Result<Selector> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyOption { option });
    }
    Selector::parse(value).map_err(|source| ValidationError::InvalidSelector { option, source })
}

fn check_class(option: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ValidationError::EmptyOption { option });
    }
    if value.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidClassName {
            option,
            value: value.to_string(),
        });
    }
    Ok(())
}
