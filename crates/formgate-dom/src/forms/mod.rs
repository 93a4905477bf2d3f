//! Form Controls Module
//!
//! Live control state (value, custom validity) and the constraint
//! validation rules evaluated over it.

mod validity;

pub use validity::{ValidityState, compute_validity};
pub(crate) use validity::will_validate;

/// Tags that carry a live value and take part in constraint validation
pub fn is_form_control(tag: &str) -> bool {
    matches!(tag, "input" | "textarea" | "select")
}

/// Live state of a form control
#[derive(Debug, Clone, Default)]
pub struct ControlState {
    /// Value set by the user or script; `None` until the value is dirtied
    value: Option<String>,
    /// Default value derived from content: textarea text, selected option
    default_value: Option<String>,
    /// Custom validity message, empty when unset
    custom_message: String,
}

impl ControlState {
    /// Dirty value, if any
    pub fn dirty_value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = Some(value.to_string());
    }

    /// Content-derived default value (textarea and select only)
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub(crate) fn set_default_value(&mut self, value: Option<String>) {
        self.default_value = value;
    }

    /// Custom validity message (empty string when none)
    pub fn custom_message(&self) -> &str {
        &self.custom_message
    }

    /// Set custom validity; an empty message clears it
    pub fn set_custom_validity(&mut self, message: &str) {
        self.custom_message = message.to_string();
    }
}

/// HTML input types relevant to constraint validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    #[default]
    Text,
    Password,
    Email,
    Number,
    Tel,
    Url,
    Search,
    Hidden,
    Checkbox,
    Radio,
    Submit,
    Reset,
    Button,
    Image,
}

impl InputType {
    /// Parse from the `type` attribute; unknown types fall back to text
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "password" => Self::Password,
            "email" => Self::Email,
            "number" => Self::Number,
            "tel" => Self::Tel,
            "url" => Self::Url,
            "search" => Self::Search,
            "hidden" => Self::Hidden,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "submit" => Self::Submit,
            "reset" => Self::Reset,
            "button" => Self::Button,
            "image" => Self::Image,
            _ => Self::Text,
        }
    }

    /// Check if this is a button type
    pub fn is_button(&self) -> bool {
        matches!(self, Self::Submit | Self::Reset | Self::Button | Self::Image)
    }

    /// Types that honour `minlength`, `maxlength` and `pattern`
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            Self::Text | Self::Password | Self::Email | Self::Tel | Self::Url | Self::Search
        )
    }
}
