//! Custom name-pattern rule
//!
//! Applies only to inputs tagged with one of `NAME_FIELD_MARKERS`. A tagged
//! input whose non-empty value contains anything other than Latin or
//! Cyrillic letters, whitespace or a hyphen gets a custom validity message
//! taken from its `data-error-message` attribute.

use std::sync::LazyLock;

use formgate_dom::ElementData;
use regex::Regex;

/// Marker classes that opt an input into the name rule.
///
/// The BEM modifiers used by popup markup, plus their bare short forms.
/// Hard-coded rather than configured; see DESIGN.md.
pub const NAME_FIELD_MARKERS: [&str; 4] = [
    "popup__input_type_name",
    "popup__input_type_card-name",
    "name",
    "card-name",
];

/// Attribute holding the message shown when the rule fails
pub const ERROR_MESSAGE_ATTR: &str = "data-error-message";

/// Used when a tagged input has no `data-error-message`
pub const FALLBACK_MESSAGE: &str = "Only letters, spaces and hyphens are allowed.";

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-zа-яА-ЯёЁ\s\-]+$").expect("name pattern is valid"));

/// Whether the input carries a name-rule marker class
pub fn applies_to(elem: &ElementData) -> bool {
    NAME_FIELD_MARKERS.iter().any(|m| elem.has_class(m))
}

/// Whether a value satisfies the name pattern (empty values always do)
pub fn is_valid_name(value: &str) -> bool {
    value.is_empty() || NAME_PATTERN.is_match(value)
}

/// Custom validity message the rule imposes on `elem` with `value`, if any
pub fn violation(elem: &ElementData, value: &str) -> Option<String> {
    if !applies_to(elem) || is_valid_name(value) {
        return None;
    }
    let message = elem
        .get_attr(ERROR_MESSAGE_ATTR)
        .filter(|m| !m.is_empty())
        .unwrap_or(FALLBACK_MESSAGE);
    Some(message.to_string())
}
