//! Form state snapshots for printing

use std::fmt;

use formgate::{ButtonState, FormBinding, FormValidator};
use formgate_dom::{Document, NodeId};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct FormReport {
    pub form: String,
    /// `None` when the form has no submit button
    pub button: Option<&'static str>,
    pub fields: Vec<FieldReport>,
}

#[derive(Debug, Serialize)]
pub struct FieldReport {
    pub input: String,
    pub value: String,
    pub valid: bool,
    /// Text currently shown in the error element
    pub error_text: Option<String>,
}

/// Label for a node: `#id` when it has one, else its arena index
fn label(doc: &Document, node: NodeId) -> String {
    match doc.element(node).ok().and_then(|e| e.id()) {
        Some(id) => format!("#{id}"),
        None => node.to_string(),
    }
}

impl FormReport {
    pub fn collect(
        doc: &Document,
        validator: &FormValidator,
        binding: &FormBinding,
    ) -> anyhow::Result<Self> {
        let button = validator.button_state(doc, binding)?.map(|state| match state {
            ButtonState::Enabled => "enabled",
            ButtonState::Disabled => "disabled",
        });

        let mut fields = Vec::with_capacity(binding.fields.len());
        for field in &binding.fields {
            let error_text = field.error.map(|e| doc.text_content(e)).transpose()?;
            fields.push(FieldReport {
                input: label(doc, field.input),
                value: doc.value(field.input)?.to_string(),
                valid: doc.check_validity(field.input)?,
                error_text,
            });
        }

        Ok(Self {
            form: label(doc, binding.form),
            button,
            fields,
        })
    }
}

impl fmt::Display for FormReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "form {} (submit button: {})",
            self.form,
            self.button.unwrap_or("missing")
        )?;
        for field in &self.fields {
            let status = if field.valid { "valid" } else { "invalid" };
            write!(f, "  {} = {:?}: {}", field.input, field.value, status)?;
            match &field.error_text {
                Some(text) if !text.is_empty() => writeln!(f, " ({text})")?,
                _ => writeln!(f)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formgate::ValidationConfig;

    const PAGE: &str = r#"
        <form class="popup__form" id="edit">
          <input class="popup__input popup__input_type_name" id="who" required data-error-message="Letters only">
          <span id="who-error"></span>
          <button class="popup__button">Save</button>
        </form>
    "#;

    #[test]
    fn test_report_reflects_input() {
        let mut doc = formgate_html::parse(PAGE).unwrap();
        let validator = FormValidator::new(ValidationConfig::default()).unwrap();
        let binding = validator.enable_validation(&mut doc).unwrap().remove(0);

        let who = doc.get_element_by_id("who").unwrap();
        doc.user_input(who, "R2D2").unwrap();

        let report = FormReport::collect(&doc, &validator, &binding).unwrap();
        assert_eq!(report.form, "#edit");
        assert_eq!(report.button, Some("disabled"));
        assert_eq!(report.fields[0].error_text.as_deref(), Some("Letters only"));
        assert_eq!(
            report.to_string(),
            "form #edit (submit button: disabled)\n  #who = \"R2D2\": invalid (Letters only)\n"
        );
    }
}
