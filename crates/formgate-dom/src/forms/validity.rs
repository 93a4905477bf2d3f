//! Constraint Validation
//!
//! Validity flags are recomputed from the element's attributes and live
//! value on every query; nothing is cached between checks.

use std::sync::LazyLock;

use regex::Regex;

use super::InputType;
use crate::ElementData;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

/// Validity state for a form control
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidityState {
    /// Required but empty
    pub value_missing: bool,
    /// Value doesn't match the input type (email, url)
    pub type_mismatch: bool,
    /// Value doesn't match the `pattern` attribute
    pub pattern_mismatch: bool,
    /// Longer than `maxlength`
    pub too_long: bool,
    /// Shorter than `minlength`
    pub too_short: bool,
    /// Below `min`
    pub range_underflow: bool,
    /// Above `max`
    pub range_overflow: bool,
    /// Not parseable for the input type
    pub bad_input: bool,
    /// Custom validity message set
    pub custom_error: bool,
    custom_message: String,
}

impl ValidityState {
    /// Check if all constraints are satisfied
    pub fn valid(&self) -> bool {
        !self.value_missing
            && !self.type_mismatch
            && !self.pattern_mismatch
            && !self.too_long
            && !self.too_short
            && !self.range_underflow
            && !self.range_overflow
            && !self.bad_input
            && !self.custom_error
    }

    /// Human-readable message; the custom message wins when set
    pub fn validation_message(&self) -> String {
        if self.custom_error {
            return self.custom_message.clone();
        }
        if self.value_missing {
            return "Please fill out this field.".to_string();
        }
        if self.type_mismatch {
            return "Please enter a valid value.".to_string();
        }
        if self.pattern_mismatch {
            return "Please match the requested format.".to_string();
        }
        if self.too_long {
            return "Please shorten this text.".to_string();
        }
        if self.too_short {
            return "Please lengthen this text.".to_string();
        }
        if self.range_underflow {
            return "Value must be greater or equal to minimum.".to_string();
        }
        if self.range_overflow {
            return "Value must be less or equal to maximum.".to_string();
        }
        if self.bad_input {
            return "Please enter a number.".to_string();
        }
        String::new()
    }

    fn set_custom(&mut self, message: &str) {
        self.custom_error = !message.is_empty();
        self.custom_message = message.to_string();
    }
}

/// Whether the element is a candidate for constraint validation
pub(crate) fn will_validate(elem: &ElementData) -> bool {
    if elem.control().is_none() || elem.has_attr("disabled") {
        return false;
    }
    if elem.tag() != "input" {
        return true;
    }
    if elem.has_attr("readonly") {
        return false;
    }
    let ty = input_type(elem);
    !(ty.is_button() || ty == InputType::Hidden)
}

fn input_type(elem: &ElementData) -> InputType {
    elem.get_attr("type").map(InputType::parse).unwrap_or_default()
}

/// Compute the validity of a form control from its attributes and value
pub fn compute_validity(elem: &ElementData) -> ValidityState {
    let mut state = ValidityState::default();
    let Some(control) = elem.control() else {
        return state;
    };
    if !will_validate(elem) {
        return state;
    }

    let value = elem.value().unwrap_or("");
    let dirty = control.dirty_value().is_some();
    let ty = if elem.tag() == "input" {
        input_type(elem)
    } else {
        InputType::Text
    };

    if elem.has_attr("required") {
        state.value_missing = match ty {
            InputType::Checkbox | InputType::Radio => !elem.has_attr("checked"),
            _ => value.is_empty(),
        };
    }

    if !value.is_empty() {
        if ty.is_text_like() {
            check_lengths(elem, value, dirty, &mut state);
            check_pattern(elem, value, &mut state);
        }
        match ty {
            InputType::Email => state.type_mismatch = !valid_email(elem, value),
            InputType::Url => state.type_mismatch = url::Url::parse(value.trim()).is_err(),
            InputType::Number => check_number(elem, value, &mut state),
            _ => {}
        }
    }

    state.set_custom(control.custom_message());
    state
}

// Length limits only apply once the user has edited the value.
fn check_lengths(elem: &ElementData, value: &str, dirty: bool, state: &mut ValidityState) {
    if !dirty {
        return;
    }
    let len = value.chars().count();
    if let Some(min) = parse_attr::<usize>(elem, "minlength") {
        state.too_short = len < min;
    }
    if let Some(max) = parse_attr::<usize>(elem, "maxlength") {
        state.too_long = len > max;
    }
}

fn check_pattern(elem: &ElementData, value: &str, state: &mut ValidityState) {
    let Some(pattern) = elem.get_attr("pattern") else {
        return;
    };
    match Regex::new(&format!("^(?:{pattern})$")) {
        Ok(re) => state.pattern_mismatch = !re.is_match(value),
        Err(err) => tracing::debug!("Ignoring invalid pattern {:?}: {}", pattern, err),
    }
}

fn check_number(elem: &ElementData, value: &str, state: &mut ValidityState) {
    let Ok(number) = value.trim().parse::<f64>() else {
        state.bad_input = true;
        return;
    };
    if let Some(min) = parse_attr::<f64>(elem, "min") {
        state.range_underflow = number < min;
    }
    if let Some(max) = parse_attr::<f64>(elem, "max") {
        state.range_overflow = number > max;
    }
}

fn valid_email(elem: &ElementData, value: &str) -> bool {
    if elem.has_attr("multiple") {
        value.split(',').all(|part| EMAIL.is_match(part.trim()))
    } else {
        EMAIL.is_match(value)
    }
}

fn parse_attr<T: std::str::FromStr>(elem: &ElementData, name: &str) -> Option<T> {
    elem.get_attr(name)?.trim().parse().ok()
}
