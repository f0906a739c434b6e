//! Form inputs from [`FieldDescriptor`]s.

use super::html::{escape, flag, optional_attr};
use crate::domain::form::OptionLabel;
use crate::domain::{FieldDescriptor, FieldKind, Messages};

/// A label plus the matching `<input>` or `<select>`.
///
/// Disabled fields carry the `field-disabled` class and are not submitted.
/// An empty select starts with a placeholder option keyed
/// `form.select<Name>`.
#[must_use]
pub fn render_field(field: &FieldDescriptor, messages: &Messages) -> String {
    let id = format!("field-{}", escape(&field.name));
    let class = if field.disabled {
        "field field-disabled"
    } else {
        "field"
    };
    let control = match field.kind.input_type() {
        Some(input_type) => render_input(field, &id, input_type, messages),
        None => render_select(field, &id, messages),
    };
    format!(
        r#"<div class="{class}"><label for="{id}">{label}</label>{control}</div>"#,
        label = escape(&messages.t(&field.label_key)),
    )
}

fn common_attrs(field: &FieldDescriptor, id: &str) -> String {
    format!(
        r#"id="{id}" name="{name}"{required}{disabled}"#,
        name = escape(&field.name),
        required = flag("required", field.required),
        disabled = flag("disabled", field.disabled),
    )
}

fn render_input(
    field: &FieldDescriptor,
    id: &str,
    input_type: &str,
    messages: &Messages,
) -> String {
    let placeholder = field
        .placeholder_key
        .as_deref()
        .map(|key| messages.t(key));
    let (min, max) = if field.kind == FieldKind::Number {
        (field.min, field.max)
    } else {
        (None, None)
    };
    format!(
        r#"<input type="{input_type}" {attrs} value="{value}"{placeholder}{min}{max}>"#,
        attrs = common_attrs(field, id),
        value = escape(&field.value),
        placeholder = optional_attr("placeholder", placeholder),
        min = optional_attr("min", min),
        max = optional_attr("max", max),
    )
}

fn render_select(field: &FieldDescriptor, id: &str, messages: &Messages) -> String {
    let mut options = String::new();
    if let Some(key) = field.select_placeholder_key() {
        options.push_str(&format!(
            r#"<option value="" disabled selected>{}</option>"#,
            escape(&messages.t(&key))
        ));
    }
    for option in &field.options {
        let label = match &option.label {
            OptionLabel::Literal(text) => text.clone(),
            OptionLabel::Message(key) => messages.t(key),
        };
        options.push_str(&format!(
            r#"<option value="{value}"{selected}>{label}</option>"#,
            value = escape(&option.value),
            selected = flag("selected", option.value == field.value),
            label = escape(&label),
        ));
    }
    format!(
        "<select {attrs}>{options}</select>",
        attrs = common_attrs(field, id)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::form::{currency_options, gender_options};
    use crate::domain::Locale;
    use serde_json::json;

    fn messages() -> Messages {
        Messages::new(
            Locale::En,
            json!({"form": {
                "age": "Age", "currency": "Currency", "gender": "Gender",
                "selectCurrency": "Select currency", "female": "Female", "male": "Male"
            }}),
        )
        .expect("catalog")
    }

    #[test]
    fn number_inputs_carry_bounds() {
        let field = FieldDescriptor::new("age", "form.age", FieldKind::Number)
            .value("29")
            .bounds(18, 100)
            .required();

        let html = render_field(&field, &messages());

        assert!(html.contains(r#"<label for="field-age">Age</label>"#), "{html}");
        assert!(
            html.contains(r#"<input type="number" id="field-age" name="age" required value="29" min="18" max="100">"#),
            "{html}"
        );
    }

    #[test]
    fn empty_select_shows_placeholder() {
        let field = FieldDescriptor::new("currency", "form.currency", FieldKind::Select)
            .options(currency_options());

        let html = render_field(&field, &messages());

        assert!(
            html.contains(r#"<option value="" disabled selected>Select currency</option>"#),
            "{html}"
        );
        assert!(html.contains(r#"<option value="SAR">SAR</option>"#), "{html}");
    }

    #[test]
    fn disabled_select_marks_value_and_class() {
        let field = FieldDescriptor::new("gender", "form.gender", FieldKind::Select)
            .value("female")
            .options(gender_options())
            .disabled();

        let html = render_field(&field, &messages());

        assert!(html.starts_with(r#"<div class="field field-disabled">"#), "{html}");
        assert!(html.contains(r#"name="gender" disabled>"#), "{html}");
        assert!(html.contains(r#"<option value="female" selected>Female</option>"#), "{html}");
        assert!(!html.contains("Select"), "{html}");
    }
}
