//! Behavioural tests for live validation
//!
//! Forms are built with the `Document` builder API using the default
//! popup-form configuration.

use formgate::{
    ButtonState, Document, FormBinding, FormValidator, NodeId, ValidationConfig,
    clear_validation, enable_validation,
};
use formgate_dom::EventType;

const INPUT_ERROR: &str = "popup__input_type_error";
const ERROR_VISIBLE: &str = "popup__error_visible";
const INACTIVE: &str = "popup__button_disabled";

struct Popup {
    doc: Document,
    form: NodeId,
    button: NodeId,
}

/// One `.popup__form` whose inputs each get a matching `#{id}-error` span
fn popup(inputs: &[(&str, &[(&str, &str)])]) -> Popup {
    let mut doc = Document::default();
    let body = doc.body();
    let form = doc
        .append_element(body, "form", &[("class", "popup__form"), ("novalidate", "")])
        .unwrap();
    for (id, attrs) in inputs {
        let mut all = vec![("id", *id), ("class", "popup__input")];
        all.extend_from_slice(attrs);
        doc.append_element(form, "input", &all).unwrap();
        let error_id = format!("{id}-error");
        doc.append_element(form, "span", &[("id", error_id.as_str()), ("class", "popup__error")])
            .unwrap();
    }
    let button = doc
        .append_element(form, "button", &[("class", "popup__button"), ("type", "submit")])
        .unwrap();
    Popup { doc, form, button }
}

fn input(doc: &Document, id: &str) -> NodeId {
    doc.get_element_by_id(id).unwrap()
}

fn error_text(doc: &Document, id: &str) -> String {
    let error = doc.get_element_by_id(&format!("{id}-error")).unwrap();
    doc.text_content(error).unwrap()
}

fn button_disabled(doc: &Document, button: NodeId) -> bool {
    let disabled = doc.has_attribute(button, "disabled").unwrap();
    let inactive = doc.has_class(button, INACTIVE).unwrap();
    assert_eq!(disabled, inactive, "inactive class and disabled attribute diverged");
    disabled
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_required_input_enables_button_once_filled() {
    let mut p = popup(&[("title", &[("required", "")])]);
    enable_validation(&mut p.doc, &ValidationConfig::default()).unwrap();
    assert!(button_disabled(&p.doc, p.button));

    let title = input(&p.doc, "title");
    p.doc.user_input(title, "John").unwrap();

    assert!(!button_disabled(&p.doc, p.button));
    assert_eq!(error_text(&p.doc, "title"), "");
    assert!(!p.doc.has_class(title, INPUT_ERROR).unwrap());
}

#[test]
fn test_name_field_rejects_digits() {
    let mut p = popup(&[(
        "profile-name",
        &[("class", "popup__input name"), ("required", ""), ("data-error-message", "Letters, spaces and hyphens only")],
    )]);
    enable_validation(&mut p.doc, &ValidationConfig::default()).unwrap();

    let name = input(&p.doc, "profile-name");
    p.doc.user_input(name, "John123").unwrap();

    assert_eq!(error_text(&p.doc, "profile-name"), "Letters, spaces and hyphens only");
    assert!(p.doc.has_class(name, INPUT_ERROR).unwrap());
    let error = p.doc.get_element_by_id("profile-name-error").unwrap();
    assert!(p.doc.has_class(error, ERROR_VISIBLE).unwrap());
    assert!(button_disabled(&p.doc, p.button));
}

#[test]
fn test_clear_validation_resets_errors_and_disables() {
    let mut p = popup(&[(
        "place-name",
        &[("class", "popup__input card-name"), ("data-error-message", "Letters only")],
    )]);
    let config = ValidationConfig::default();
    enable_validation(&mut p.doc, &config).unwrap();

    let name = input(&p.doc, "place-name");
    p.doc.user_input(name, "Place 42").unwrap();
    assert_eq!(error_text(&p.doc, "place-name"), "Letters only");

    clear_validation(&mut p.doc, p.form, &config).unwrap();

    assert_eq!(error_text(&p.doc, "place-name"), "");
    assert!(!p.doc.has_class(name, INPUT_ERROR).unwrap());
    let error = p.doc.get_element_by_id("place-name-error").unwrap();
    assert!(!p.doc.has_class(error, ERROR_VISIBLE).unwrap());
    assert!(!p.doc.validity(name).unwrap().custom_error);
    assert!(button_disabled(&p.doc, p.button));

    // Disabled even though every field is now valid.
    p.doc.set_value(name, "Lake Baikal").unwrap();
    clear_validation(&mut p.doc, p.form, &config).unwrap();
    assert!(button_disabled(&p.doc, p.button));
}

#[test]
fn test_fixing_the_only_invalid_input_enables_button() {
    let mut p = popup(&[
        ("title", &[("required", "")]),
        ("link", &[("type", "url"), ("required", "")]),
    ]);
    enable_validation(&mut p.doc, &ValidationConfig::default()).unwrap();

    let title = input(&p.doc, "title");
    let link = input(&p.doc, "link");
    p.doc.user_input(title, "Arkhyz").unwrap();
    p.doc.user_input(link, "not a link").unwrap();
    assert!(button_disabled(&p.doc, p.button));
    assert_eq!(error_text(&p.doc, "link"), "Please enter a valid value.");

    p.doc.user_input(link, "https://example.com/arkhyz.jpg").unwrap();
    assert!(!button_disabled(&p.doc, p.button));
    assert_eq!(error_text(&p.doc, "link"), "");
}

// ============================================================================
// PROPERTIES
// ============================================================================

#[test]
fn test_valid_or_empty_names_set_no_custom_message() {
    let mut p = popup(&[("profile-name", &[("class", "popup__input name"), ("data-error-message", "bad")])]);
    enable_validation(&mut p.doc, &ValidationConfig::default()).unwrap();
    let name = input(&p.doc, "profile-name");

    for value in ["Жак-Ив Кусто", "Anne Marie", "", "Ёж"] {
        p.doc.user_input(name, value).unwrap();
        let validity = p.doc.validity(name).unwrap();
        assert!(!validity.custom_error, "{value:?} set a custom message");
    }
}

#[test]
fn test_invalid_names_use_data_error_message() {
    let mut p = popup(&[("profile-name", &[("class", "popup__input name"), ("data-error-message", "Only letters")])]);
    enable_validation(&mut p.doc, &ValidationConfig::default()).unwrap();
    let name = input(&p.doc, "profile-name");

    for value in ["R2-D2", "a_b", "x@y", "Zoë"] {
        p.doc.user_input(name, value).unwrap();
        assert_eq!(p.doc.validation_message(name).unwrap(), "Only letters", "{value:?}");
    }
}

#[test]
fn test_hide_error_twice_is_idempotent() {
    let mut p = popup(&[("title", &[("required", "")])]);
    let validator = FormValidator::new(ValidationConfig::default()).unwrap();
    let binding = validator.enable_validation(&mut p.doc).unwrap().remove(0);
    let field = binding.fields[0];

    validator.show_input_error(&mut p.doc, field, "Please fill out this field.").unwrap();
    validator.hide_input_error(&mut p.doc, field).unwrap();
    validator.hide_input_error(&mut p.doc, field).unwrap();

    assert_eq!(error_text(&p.doc, "title"), "");
    assert!(!p.doc.has_class(field.input, INPUT_ERROR).unwrap());
    assert!(!p.doc.has_class(field.error.unwrap(), ERROR_VISIBLE).unwrap());
}

#[test]
fn test_button_invariant_holds_across_edits() {
    let mut p = popup(&[("title", &[("required", ""), ("minlength", "2")])]);
    enable_validation(&mut p.doc, &ValidationConfig::default()).unwrap();
    let title = input(&p.doc, "title");

    for value in ["", "a", "ab", "", "abc"] {
        p.doc.user_input(title, value).unwrap();
        let expect_disabled = value.chars().count() < 2;
        assert_eq!(button_disabled(&p.doc, p.button), expect_disabled, "{value:?}");
    }
}

#[test]
fn test_native_message_shown_for_short_value() {
    let mut p = popup(&[("title", &[("minlength", "2")])]);
    enable_validation(&mut p.doc, &ValidationConfig::default()).unwrap();
    let title = input(&p.doc, "title");

    p.doc.user_input(title, "a").unwrap();
    assert_eq!(error_text(&p.doc, "title"), "Please lengthen this text.");
}

#[test]
fn test_submit_always_prevented() {
    let mut p = popup(&[("title", &[])]);
    assert!(p.doc.submit(p.form).unwrap());

    enable_validation(&mut p.doc, &ValidationConfig::default()).unwrap();
    let title = input(&p.doc, "title");
    p.doc.user_input(title, "valid").unwrap();
    assert!(!button_disabled(&p.doc, p.button));
    assert!(!p.doc.submit(p.form).unwrap());
}

#[test]
fn test_enabling_twice_double_registers() {
    let mut p = popup(&[("title", &[("required", "")])]);
    let config = ValidationConfig::default();
    enable_validation(&mut p.doc, &config).unwrap();
    enable_validation(&mut p.doc, &config).unwrap();

    let title = input(&p.doc, "title");
    assert_eq!(p.doc.listener_count(title, EventType::Input), 2);
    assert_eq!(p.doc.listener_count(p.form, EventType::Submit), 2);

    p.doc.user_input(title, "still consistent").unwrap();
    assert!(!button_disabled(&p.doc, p.button));
}

#[test]
fn test_only_matching_forms_are_wired() {
    let mut p = popup(&[("title", &[("required", "")])]);
    let body = p.doc.body();
    let search = p.doc.append_element(body, "form", &[("class", "search")]).unwrap();
    let query = p.doc.append_element(search, "input", &[("class", "popup__input"), ("id", "q"), ("required", "")]).unwrap();
    let go = p.doc.append_element(search, "button", &[("class", "popup__button")]).unwrap();

    let bindings = enable_validation(&mut p.doc, &ValidationConfig::default()).unwrap();
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].form, p.form);

    assert_eq!(p.doc.listener_count(query, EventType::Input), 0);
    assert!(!p.doc.has_attribute(go, "disabled").unwrap());
}

#[test]
fn test_selector_matching_nothing_is_a_no_op() {
    let mut p = popup(&[("title", &[("required", "")])]);
    let config = ValidationConfig {
        form_selector: ".does-not-exist".into(),
        ..Default::default()
    };
    let bindings = enable_validation(&mut p.doc, &config).unwrap();
    assert!(bindings.is_empty());
    assert!(!p.doc.has_attribute(p.button, "disabled").unwrap());
}

#[test]
fn test_missing_error_element_still_gates_button() {
    let mut doc = Document::default();
    let body = doc.body();
    let form = doc.append_element(body, "form", &[("class", "popup__form")]).unwrap();
    let field = doc
        .append_element(form, "input", &[("class", "popup__input"), ("id", "orphan"), ("required", "")])
        .unwrap();
    let button = doc.append_element(form, "button", &[("class", "popup__button")]).unwrap();

    let bindings = enable_validation(&mut doc, &ValidationConfig::default()).unwrap();
    assert_eq!(bindings[0].fields[0].error, None);

    doc.user_input(field, "").unwrap();
    assert!(doc.has_class(field, INPUT_ERROR).unwrap());
    assert!(button_disabled(&doc, button));

    doc.user_input(field, "filled").unwrap();
    assert!(!button_disabled(&doc, button));
}

#[test]
fn test_error_elements_resolved_once_at_setup() {
    let mut p = popup(&[("title", &[("required", "")])]);
    let validator = FormValidator::new(ValidationConfig::default()).unwrap();
    let bindings: Vec<FormBinding> = validator.enable_validation(&mut p.doc).unwrap();
    let original = bindings[0].fields[0].error.unwrap();

    // A later element reusing the id does not steal the error text.
    let body = p.doc.body();
    let impostor = p.doc.append_element(body, "span", &[("id", "title-error")]).unwrap();

    let title = input(&p.doc, "title");
    p.doc.user_input(title, "").unwrap();
    assert_eq!(p.doc.text_content(original).unwrap(), "Please fill out this field.");
    assert_eq!(p.doc.text_content(impostor).unwrap(), "");
}

#[test]
fn test_button_state_readback() {
    let mut p = popup(&[("title", &[("required", "")])]);
    let validator = FormValidator::new(ValidationConfig::default()).unwrap();
    let binding = validator.enable_validation(&mut p.doc).unwrap().remove(0);
    assert_eq!(validator.button_state(&p.doc, &binding).unwrap(), Some(ButtonState::Disabled));

    let title = input(&p.doc, "title");
    p.doc.set_value(title, "quiet").unwrap();
    assert_eq!(validator.toggle_button_state(&mut p.doc, &binding).unwrap(), ButtonState::Enabled);
    assert_eq!(validator.button_state(&p.doc, &binding).unwrap(), Some(ButtonState::Enabled));
}
