//! Integration tests for formgate-dom
//!
//! Document building, queries and constraint validation through the
//! public API only.

use formgate_dom::{Document, DomError, Event, EventType, Selector};
use std::cell::RefCell;
use std::rc::Rc;

// ============================================================================
// QUERIES
// ============================================================================

#[test]
fn test_query_selector_all_document_order() {
    let mut doc = Document::default();
    let body = doc.body();
    let first = doc.append_element(body, "form", &[("class", "popup__form")]).unwrap();
    let a = doc.append_element(first, "input", &[("class", "popup__input")]).unwrap();
    let second = doc.append_element(body, "form", &[("class", "popup__form wide")]).unwrap();
    let b = doc.append_element(second, "input", &[("class", "popup__input")]).unwrap();

    let root = doc.tree().root();
    assert_eq!(doc.query_selector_all(root, ".popup__form").unwrap(), vec![first, second]);
    assert_eq!(doc.query_selector_all(root, ".popup__input").unwrap(), vec![a, b]);
    assert_eq!(doc.query_selector_all(second, "input").unwrap(), vec![b]);
    assert_eq!(doc.query_selector(root, "form.wide input").unwrap(), Some(b));
    assert_eq!(doc.query_selector(root, ".missing").unwrap(), None);
}

#[test]
fn test_parsed_selector_reuse() {
    let mut doc = Document::default();
    let body = doc.body();
    let button = doc
        .append_element(body, "button", &[("type", "submit"), ("class", "popup__button")])
        .unwrap();
    doc.append_element(body, "button", &[("type", "button")]).unwrap();

    let selector: Selector = "button[type=submit]".parse().unwrap();
    assert_eq!(doc.select_all(body, &selector), vec![button]);
    assert!(selector.matches(doc.tree(), button));
}

#[test]
fn test_attribute_and_class_updates() {
    let mut doc = Document::default();
    let body = doc.body();
    let button = doc.append_element(body, "button", &[("class", "popup__button")]).unwrap();

    doc.add_class(button, "popup__button_disabled").unwrap();
    doc.set_attribute(button, "disabled", "").unwrap();
    assert_eq!(
        doc.get_attribute(button, "class").unwrap(),
        Some("popup__button popup__button_disabled")
    );
    assert!(doc.has_attribute(button, "disabled").unwrap());

    doc.remove_class(button, "popup__button_disabled").unwrap();
    doc.remove_attribute(button, "disabled").unwrap();
    assert!(!doc.has_class(button, "popup__button_disabled").unwrap());
    assert!(!doc.has_attribute(button, "disabled").unwrap());
}

// ============================================================================
// CONSTRAINT VALIDATION
// ============================================================================

#[test]
fn test_custom_validity_round_trip() {
    let mut doc = Document::default();
    let body = doc.body();
    let input = doc.append_element(body, "input", &[]).unwrap();

    assert!(doc.check_validity(input).unwrap());
    doc.set_custom_validity(input, "Names may not contain digits").unwrap();
    assert!(!doc.check_validity(input).unwrap());
    assert_eq!(doc.validation_message(input).unwrap(), "Names may not contain digits");

    doc.set_custom_validity(input, "").unwrap();
    assert!(doc.check_validity(input).unwrap());
    assert_eq!(doc.validation_message(input).unwrap(), "");
}

#[test]
fn test_textarea_and_select_are_controls() {
    let mut doc = Document::default();
    let body = doc.body();
    let textarea = doc.append_element(body, "textarea", &[("required", "")]).unwrap();
    let select = doc.append_element(body, "select", &[]).unwrap();
    let div = doc.append_element(body, "div", &[]).unwrap();

    assert!(!doc.check_validity(textarea).unwrap());
    doc.set_value(textarea, "text").unwrap();
    assert!(doc.check_validity(textarea).unwrap());
    assert!(doc.will_validate(select).unwrap());
    assert!(matches!(doc.check_validity(div), Err(DomError::NotAFormControl(_))));
}

#[test]
fn test_submit_button_input_is_barred() {
    let mut doc = Document::default();
    let body = doc.body();
    let submit = doc
        .append_element(body, "input", &[("type", "submit"), ("required", "")])
        .unwrap();
    assert!(!doc.will_validate(submit).unwrap());
    assert!(doc.check_validity(submit).unwrap());
}

// ============================================================================
// EVENTS
// ============================================================================

#[test]
fn test_listeners_run_in_registration_order() {
    let mut doc = Document::default();
    let body = doc.body();
    let input = doc.append_element(body, "input", &[]).unwrap();

    let log = Rc::new(RefCell::new(Vec::new()));
    for tag in ["first", "second"] {
        let log = Rc::clone(&log);
        doc.add_event_listener(input, EventType::Input, move |doc, event| {
            let value = doc.value(event.target).unwrap().to_string();
            log.borrow_mut().push(format!("{tag}:{value}"));
        })
        .unwrap();
    }

    doc.user_input(input, "abc").unwrap();
    assert_eq!(*log.borrow(), ["first:abc", "second:abc"]);
}

#[test]
fn test_dispatch_to_missing_node_fails() {
    let mut doc = Document::default();
    let body = doc.body();
    let input = doc.append_element(body, "input", &[]).unwrap();
    let mut other = Document::empty("about:blank");
    let mut event = Event::new(EventType::Change, input);
    assert!(matches!(
        other.dispatch_event(&mut event),
        Err(DomError::NodeNotFound(_))
    ));
}
