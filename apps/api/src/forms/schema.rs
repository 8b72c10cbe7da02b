//! Form schemas: the declarative description of a form's fields,
//! independent of any particular submission.

use serde::Deserialize;

use crate::values::FieldValue;

/// A form definition: a title plus an ordered field list.
#[derive(Debug, Clone, Deserialize)]
pub struct FormSchema {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

fn default_title() -> String {
    "Form".to_string()
}

/// One field of a form. `kind` carries only the attributes its control
/// needs; choice kinds own their option lists.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawField")]
pub struct FieldSchema {
    pub name: String,
    pub label: String,
    pub section: String,
    pub required: bool,
    pub kind: FieldKind,
    pub default: Option<FieldValue>,
}

/// Closed set of field kinds the renderer dispatches over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Number,
    Textarea,
    Select { options: Vec<String> },
    Checkbox { options: Vec<String> },
    Radio { options: Vec<String> },
}

impl FieldKind {
    /// HTML `type` attribute for the single-input kinds.
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Email => "email",
            FieldKind::Tel => "tel",
            FieldKind::Number => "number",
            _ => "text",
        }
    }
}

/// Wire shape of a field as authored in schema JSON.
#[derive(Debug, Deserialize)]
struct RawField {
    name: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default, rename = "type")]
    field_type: Option<String>,
    #[serde(default)]
    section: Option<String>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    default: Option<FieldValue>,
}

impl From<RawField> for FieldSchema {
    fn from(raw: RawField) -> Self {
        let kind = match raw.field_type.as_deref().unwrap_or("text") {
            "text" => FieldKind::Text,
            "email" => FieldKind::Email,
            "tel" => FieldKind::Tel,
            "number" => FieldKind::Number,
            "textarea" => FieldKind::Textarea,
            "select" => FieldKind::Select {
                options: raw.options,
            },
            "checkbox" => FieldKind::Checkbox {
                options: raw.options,
            },
            "radio" => FieldKind::Radio {
                options: raw.options,
            },
            other => {
                // Lenient-degrade: unknown kinds render as plain text inputs.
                tracing::debug!("Unknown field type '{other}', rendering as text");
                FieldKind::Text
            }
        };

        FieldSchema {
            label: raw.label.unwrap_or_else(|| raw.name.clone()),
            section: raw.section.unwrap_or_else(|| "General".to_string()),
            name: raw.name,
            required: raw.required,
            kind,
            default: raw.default,
        }
    }
}
