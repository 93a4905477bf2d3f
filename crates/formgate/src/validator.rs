//! Form Validator
//!
//! Wires live validation onto every form matched by the configuration:
//! each input re-validates itself on `input` and then recomputes its form's
//! submit-button state from a full scan of the form's inputs.

use std::rc::Rc;

use formgate_dom::{Document, EventType, NodeId};

use crate::config::{Selectors, ValidationConfig};
use crate::error::Result;
use crate::rules;

/// Submit button state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Enabled,
    Disabled,
}

/// An input and the element that displays its error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBinding {
    pub input: NodeId,
    /// Resolved once from `#{input-id}-error`; `None` if absent
    pub error: Option<NodeId>,
}

/// A validated form with its submit button and fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormBinding {
    pub form: NodeId,
    pub submit_button: Option<NodeId>,
    pub fields: Vec<FieldBinding>,
}

impl FormBinding {
    /// Resolve a form's submit button, inputs and error elements
    pub fn resolve(doc: &Document, form: NodeId, selectors: &Selectors) -> Self {
        let submit_button = doc.select_first(form, &selectors.submit_button);
        if submit_button.is_none() {
            tracing::warn!("Form {} has no submit button", form);
        }

        let fields = doc
            .select_all(form, &selectors.input)
            .into_iter()
            .filter(|&input| {
                let is_control = doc.element(input).is_ok_and(|e| e.control().is_some());
                if !is_control {
                    tracing::warn!("Skipping {} in form {}: not a form control", input, form);
                }
                is_control
            })
            .map(|input| FieldBinding {
                input,
                error: resolve_error_element(doc, input),
            })
            .collect();

        Self {
            form,
            submit_button,
            fields,
        }
    }
}

fn resolve_error_element(doc: &Document, input: NodeId) -> Option<NodeId> {
    let Some(id) = doc
        .element(input)
        .ok()
        .and_then(|e| e.id())
        .filter(|id| !id.is_empty())
    else {
        tracing::warn!("Input {} has no id; its errors will not be displayed", input);
        return None;
    };
    let error_id = format!("{id}-error");
    let matches = doc.elements_with_id(&error_id);
    match matches.as_slice() {
        [] => {
            tracing::warn!("No error element #{} for input {}", error_id, input);
            None
        }
        [only] => Some(*only),
        [first, ..] => {
            tracing::warn!(
                "{} elements share id {:?}; using the first",
                matches.len(),
                error_id
            );
            Some(*first)
        }
    }
}

/// Live validation driven by a `ValidationConfig`
#[derive(Debug, Clone)]
pub struct FormValidator {
    config: Rc<ValidationConfig>,
    selectors: Rc<Selectors>,
}

impl FormValidator {
    /// Check the configuration and build a validator
    pub fn new(config: ValidationConfig) -> Result<Self> {
        let selectors = config.compile()?;
        Ok(Self {
            config: Rc::new(config),
            selectors: Rc::new(selectors),
        })
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Resolve the binding of a single form
    pub fn bind(&self, doc: &Document, form: NodeId) -> Result<FormBinding> {
        doc.element(form)?;
        Ok(FormBinding::resolve(doc, form, &self.selectors))
    }

    /// Wire validation onto every form matching `formSelector`.
    ///
    /// Submission is always suppressed, buttons start disabled, and every
    /// input re-validates on `input`. Calling this twice registers the
    /// listeners twice.
    pub fn enable_validation(&self, doc: &mut Document) -> Result<Vec<FormBinding>> {
        let root = doc.tree().root();
        let forms = doc.select_all(root, &self.selectors.form);
        if forms.is_empty() {
            tracing::warn!(
                "formSelector {:?} matched no forms; nothing to validate",
                self.config.form_selector
            );
        }

        let mut bindings = Vec::with_capacity(forms.len());
        for form in forms {
            let binding = Rc::new(FormBinding::resolve(doc, form, &self.selectors));

            doc.add_event_listener(form, EventType::Submit, |_, event| event.prevent_default())?;
            self.set_button_state(doc, &binding, ButtonState::Disabled)?;

            for &field in &binding.fields {
                let validator = self.clone();
                let form_binding = Rc::clone(&binding);
                doc.add_event_listener(field.input, EventType::Input, move |doc, _| {
                    if let Err(err) = validator.handle_input(doc, field, &form_binding) {
                        tracing::warn!("Validation of input {} failed: {}", field.input, err);
                    }
                })?;
            }

            tracing::debug!(
                "Validation enabled on form {} ({} inputs)",
                form,
                binding.fields.len()
            );
            bindings.push(binding.as_ref().clone());
        }
        Ok(bindings)
    }

    /// Reset a form to a clean slate: no custom validity, no visible
    /// errors, submit button disabled regardless of field validity.
    pub fn clear_validation(&self, doc: &mut Document, form: NodeId) -> Result<()> {
        let binding = self.bind(doc, form)?;
        for field in &binding.fields {
            doc.set_custom_validity(field.input, "")?;
            self.hide_input_error(doc, *field)?;
        }
        self.set_button_state(doc, &binding, ButtonState::Disabled)?;
        tracing::debug!("Validation cleared on form {}", form);
        Ok(())
    }

    fn handle_input(&self, doc: &mut Document, field: FieldBinding, binding: &FormBinding) -> Result<()> {
        self.check_input_validity(doc, field)?;
        self.toggle_button_state(doc, binding)?;
        Ok(())
    }

    /// Re-validate one input and show or hide its error. Returns validity.
    ///
    /// Custom validity is reset and the name rule re-applied before the
    /// aggregate validity is read, since the rule can invalidate an
    /// otherwise valid field.
    pub fn check_input_validity(&self, doc: &mut Document, field: FieldBinding) -> Result<bool> {
        doc.set_custom_validity(field.input, "")?;

        let elem = doc.element(field.input)?;
        let violation = rules::violation(elem, elem.value().unwrap_or(""));
        if let Some(message) = violation {
            doc.set_custom_validity(field.input, &message)?;
        }

        let validity = doc.validity(field.input)?;
        let valid = validity.valid();
        if valid {
            self.hide_input_error(doc, field)?;
        } else {
            self.show_input_error(doc, field, &validity.validation_message())?;
        }
        tracing::trace!("Input {} valid: {}", field.input, valid);
        Ok(valid)
    }

    /// Mark an input invalid and display `message`
    pub fn show_input_error(&self, doc: &mut Document, field: FieldBinding, message: &str) -> Result<()> {
        doc.add_class(field.input, &self.config.input_error_class)?;
        if let Some(error) = field.error {
            doc.set_text_content(error, message)?;
            doc.add_class(error, &self.config.error_class)?;
        }
        Ok(())
    }

    /// Clear an input's error marking and text; idempotent
    pub fn hide_input_error(&self, doc: &mut Document, field: FieldBinding) -> Result<()> {
        doc.remove_class(field.input, &self.config.input_error_class)?;
        if let Some(error) = field.error {
            doc.remove_class(error, &self.config.error_class)?;
            doc.set_text_content(error, "")?;
        }
        Ok(())
    }

    /// Whether every input of the form is currently valid
    pub fn is_form_valid(&self, doc: &Document, binding: &FormBinding) -> Result<bool> {
        for field in &binding.fields {
            if !doc.check_validity(field.input)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Recompute the button state from a full scan of the form's inputs
    pub fn toggle_button_state(&self, doc: &mut Document, binding: &FormBinding) -> Result<ButtonState> {
        let state = if self.is_form_valid(doc, binding)? {
            ButtonState::Enabled
        } else {
            ButtonState::Disabled
        };
        self.set_button_state(doc, binding, state)?;
        Ok(state)
    }

    /// Apply a button state; the inactive class and `disabled` attribute
    /// always change together.
    pub fn set_button_state(&self, doc: &mut Document, binding: &FormBinding, state: ButtonState) -> Result<()> {
        let Some(button) = binding.submit_button else {
            return Ok(());
        };
        match state {
            ButtonState::Disabled => {
                doc.add_class(button, &self.config.inactive_button_class)?;
                doc.set_attribute(button, "disabled", "")?;
            }
            ButtonState::Enabled => {
                doc.remove_class(button, &self.config.inactive_button_class)?;
                doc.remove_attribute(button, "disabled")?;
            }
        }
        Ok(())
    }

    /// Current state of a form's button, read back from the DOM
    pub fn button_state(&self, doc: &Document, binding: &FormBinding) -> Result<Option<ButtonState>> {
        let Some(button) = binding.submit_button else {
            return Ok(None);
        };
        Ok(Some(if doc.has_attribute(button, "disabled")? {
            ButtonState::Disabled
        } else {
            ButtonState::Enabled
        }))
    }
}

/// Wire validation onto every form matching `config.formSelector`
pub fn enable_validation(doc: &mut Document, config: &ValidationConfig) -> Result<Vec<FormBinding>> {
    FormValidator::new(config.clone())?.enable_validation(doc)
}

/// Reset `form` to a clean, disabled state
pub fn clear_validation(doc: &mut Document, form: NodeId, config: &ValidationConfig) -> Result<()> {
    FormValidator::new(config.clone())?.clear_validation(doc, form)
}
