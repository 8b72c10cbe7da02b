//! Schema-to-HTML form renderer.
//!
//! Pure transform: a [`FormSchema`] plus stored defaults in, an HTML
//! fragment out. Fields are grouped under per-section headings in the order
//! sections first appear in the field list, and every user-controlled string
//! passes through [`escape`] before it reaches the markup.

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::forms::schema::{FieldKind, FieldSchema, FormSchema};
use crate::values::{FieldValue, ValuesRecord};

/// Minimal, deterministic HTML escaping for text and attribute positions.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Renders `schema` as a POST form targeting `action`, pre-filled from
/// `defaults` (a stored submission) falling back to each field's own
/// default. Returns an HTML fragment: title heading, sectioned two-column
/// grid, submit button.
pub fn render_form(schema: &FormSchema, action: &str, defaults: &ValuesRecord) -> String {
    let mut html = String::new();

    let _ = write!(html, "<h1>{}</h1>", escape(&schema.title));
    let _ = write!(html, r#"<form method="post" action="{}">"#, escape(action));

    for (section, fields) in group_by_section(&schema.fields) {
        let _ = write!(html, "<h2>{}</h2>", escape(section));
        html.push_str(r#"<div class="form-grid">"#);
        for field in fields {
            render_field(&mut html, field, resolve_value(field, defaults));
        }
        html.push_str("</div>");
    }

    html.push_str(r#"<button type="submit">Continue</button></form>"#);
    html
}

/// Groups fields by section, preserving the order sections are first
/// encountered while scanning the field list.
fn group_by_section(fields: &[FieldSchema]) -> Vec<(&str, Vec<&FieldSchema>)> {
    let mut sections: Vec<(&str, Vec<&FieldSchema>)> = Vec::new();
    for field in fields {
        match sections.iter_mut().find(|(name, _)| *name == field.section) {
            Some((_, group)) => group.push(field),
            None => sections.push((field.section.as_str(), vec![field])),
        }
    }
    sections
}

/// Displayed value for a field: the stored submission wins, then the
/// schema's own default. `None` renders as empty.
fn resolve_value<'a>(field: &'a FieldSchema, defaults: &'a ValuesRecord) -> Option<&'a FieldValue> {
    defaults.get(&field.name).or(field.default.as_ref())
}

fn render_field(html: &mut String, field: &FieldSchema, value: Option<&FieldValue>) {
    let name = escape(&field.name);
    let text = value.map(FieldValue::as_text).unwrap_or(Cow::Borrowed(""));

    html.push_str("<div>");
    let _ = write!(
        html,
        r#"<label for="{name}">{}</label>"#,
        escape(&field.label)
    );

    match &field.kind {
        FieldKind::Text | FieldKind::Email | FieldKind::Tel | FieldKind::Number => {
            let required = if field.required { " required" } else { "" };
            let _ = write!(
                html,
                r#"<input type="{}" name="{name}" value="{}"{required}>"#,
                field.kind.input_type(),
                escape(&text)
            );
        }
        FieldKind::Textarea => {
            let _ = write!(
                html,
                r#"<textarea name="{name}">{}</textarea>"#,
                escape(&text)
            );
        }
        FieldKind::Select { options } => {
            let _ = write!(html, r#"<select name="{name}">"#);
            for option in options {
                // Pre-select by exact string equality with the resolved
                // value; when nothing matches, the browser's implicit
                // first-option default applies.
                let selected = if option.as_str() == text.as_ref() { " selected" } else { "" };
                let escaped = escape(option);
                let _ = write!(
                    html,
                    r#"<option value="{escaped}"{selected}>{escaped}</option>"#
                );
            }
            html.push_str("</select>");
        }
        FieldKind::Checkbox { options } => {
            html.push_str(r#"<div class="checkbox-group">"#);
            for option in options {
                let checked = if value.is_some_and(|v| v.contains_option(option)) {
                    " checked"
                } else {
                    ""
                };
                let escaped = escape(option);
                let _ = write!(
                    html,
                    r#"<label><input type="checkbox" name="{name}" value="{escaped}"{checked}> {escaped}</label>"#
                );
            }
            html.push_str("</div>");
        }
        FieldKind::Radio { options } => {
            html.push_str(r#"<div class="radio-group">"#);
            for option in options {
                let checked = if option.as_str() == text.as_ref() { " checked" } else { "" };
                let escaped = escape(option);
                let _ = write!(
                    html,
                    r#"<label><input type="radio" name="{name}" value="{escaped}"{checked}> {escaped}</label>"#
                );
            }
            html.push_str("</div>");
        }
    }
    html.push_str("</div>");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(json: &str) -> FormSchema {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_one_control_per_field_in_schema_order() {
        let schema = schema(
            r#"{"title": "T", "fields": [
                {"name": "a", "type": "text", "section": "S1"},
                {"name": "b", "type": "textarea", "section": "S1"},
                {"name": "c", "type": "select", "section": "S2", "options": ["x"]}
            ]}"#,
        );
        let html = render_form(&schema, "/submit", &ValuesRecord::new());
        assert_eq!(html.matches("<input").count(), 1);
        assert_eq!(html.matches("<textarea").count(), 1);
        assert_eq!(html.matches("<select").count(), 1);
        let a = html.find(r#"name="a""#).unwrap();
        let b = html.find(r#"name="b""#).unwrap();
        let c = html.find(r#"name="c""#).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_sections_keep_first_seen_order() {
        let schema = schema(
            r#"{"fields": [
                {"name": "a", "section": "Zulu"},
                {"name": "b", "section": "Alpha"},
                {"name": "c", "section": "Zulu"}
            ]}"#,
        );
        let html = render_form(&schema, "/submit", &ValuesRecord::new());
        let zulu = html.find("<h2>Zulu</h2>").unwrap();
        let alpha = html.find("<h2>Alpha</h2>").unwrap();
        assert!(zulu < alpha);
        assert_eq!(html.matches("<h2>Zulu</h2>").count(), 1);
        // "c" lands inside the Zulu section, before the Alpha heading.
        assert!(html.find(r#"name="c""#).unwrap() < alpha);
    }

    #[test]
    fn test_select_preselects_only_the_matching_option() {
        let schema = schema(
            r#"{"fields": [{"name": "tier", "type": "select",
                "options": ["A", "B", "C"], "default": "B"}]}"#,
        );
        let html = render_form(&schema, "/submit", &ValuesRecord::new());
        assert!(html.contains(r#"<option value="B" selected>B</option>"#));
        assert_eq!(html.matches(" selected").count(), 1);
    }

    #[test]
    fn test_select_with_no_match_selects_nothing() {
        let schema = schema(
            r#"{"fields": [{"name": "tier", "type": "select",
                "options": ["A", "B"], "default": "Z"}]}"#,
        );
        let html = render_form(&schema, "/submit", &ValuesRecord::new());
        assert_eq!(html.matches(" selected").count(), 0);
    }

    #[test]
    fn test_checkbox_multi_default_checks_exactly_those_options() {
        let schema = schema(
            r#"{"fields": [{"name": "svc", "type": "checkbox",
                "options": ["A", "B", "C"], "default": ["A", "C"]}]}"#,
        );
        let html = render_form(&schema, "/submit", &ValuesRecord::new());
        assert!(html.contains(r#"value="A" checked"#));
        assert!(html.contains(r#"value="C" checked"#));
        assert!(!html.contains(r#"value="B" checked"#));
        assert_eq!(html.matches(" checked").count(), 2);
    }

    #[test]
    fn test_checkbox_scalar_default_splits_on_comma() {
        let schema = schema(
            r#"{"fields": [{"name": "svc", "type": "checkbox",
                "options": ["A", "B"], "default": "A,B"}]}"#,
        );
        let html = render_form(&schema, "/submit", &ValuesRecord::new());
        assert_eq!(html.matches(" checked").count(), 2);
    }

    #[test]
    fn test_stored_values_override_schema_defaults() {
        let schema = schema(
            r#"{"fields": [{"name": "company", "type": "text", "default": "Old Co"}]}"#,
        );
        let mut defaults = ValuesRecord::new();
        defaults.insert("company", "New Co");
        let html = render_form(&schema, "/submit", &defaults);
        assert!(html.contains(r#"value="New Co""#));
        assert!(!html.contains("Old Co"));
    }

    #[test]
    fn test_required_marker_on_scalar_inputs() {
        let schema = schema(
            r#"{"fields": [
                {"name": "a", "type": "text", "required": true},
                {"name": "b", "type": "text"}
            ]}"#,
        );
        let html = render_form(&schema, "/submit", &ValuesRecord::new());
        assert!(html.contains(r#"name="a" value="" required>"#));
        assert!(html.contains(r#"name="b" value="">"#));
    }

    #[test]
    fn test_labels_and_values_are_escaped() {
        let schema = schema(
            r#"{"fields": [{"name": "x", "label": "<script>alert(1)</script>",
                "type": "text", "default": "\"quoted\" & <tag>"}]}"#,
        );
        let html = render_form(&schema, "/submit", &ValuesRecord::new());
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&quot;quoted&quot; &amp; &lt;tag&gt;"));
    }

    #[test]
    fn test_empty_options_render_empty_control_group() {
        let schema = schema(
            r#"{"fields": [
                {"name": "s", "type": "select"},
                {"name": "c", "type": "checkbox"}
            ]}"#,
        );
        let html = render_form(&schema, "/submit", &ValuesRecord::new());
        assert!(html.contains(r#"<select name="s"></select>"#));
        assert!(html.contains(r#"<div class="checkbox-group"></div>"#));
    }

    #[test]
    fn test_radio_checks_exact_match_only() {
        let schema = schema(
            r#"{"fields": [{"name": "r", "type": "radio",
                "options": ["Yes", "No"], "default": "No"}]}"#,
        );
        let html = render_form(&schema, "/submit", &ValuesRecord::new());
        assert!(html.contains(r#"value="No" checked"#));
        assert_eq!(html.matches(" checked").count(), 1);
    }

    #[test]
    fn test_title_and_action_are_escaped() {
        let schema = schema(r#"{"title": "<b>T</b>", "fields": []}"#);
        let html = render_form(&schema, "/submit\"><script>", &ValuesRecord::new());
        assert!(html.contains("<h1>&lt;b&gt;T&lt;/b&gt;</h1>"));
        assert!(!html.contains(r#"action="/submit"><script>"#));
    }
}
