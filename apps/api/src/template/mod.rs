//! Placeholder substitution for RFP templates.
//!
//! Templates are plain UTF-8 text with `{{key}}` tokens. Each token is
//! matched as a whole, braces included, in a single left-to-right scan,
//! so keys that are prefixes of one another can never double-substitute and
//! substituted values are never re-scanned for further placeholders.
//!
//! Output is plain text for the document generator; no HTML escaping here.

use chrono::{Local, NaiveDate};

use crate::values::ValuesRecord;

/// Placeholder key that expands to today's ISO date (`YYYY-MM-DD`).
/// A values key of the same name takes precedence; field substitution
/// comes first by contract.
pub const CURRENT_DATE_KEY: &str = "CURRENT_DATE";

/// Replaces every `{{key}}` token with its value from `values` (`Multi`
/// values join with `", "`), expands `{{CURRENT_DATE}}`, and leaves unknown
/// placeholders verbatim.
pub fn render_template(template: &str, values: &ValuesRecord) -> String {
    render_template_on(template, values, Local::now().date_naive())
}

/// Deterministic variant with an injectable date, for tests.
fn render_template_on(template: &str, values: &ValuesRecord, today: NaiveDate) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let Some(end) = rest[start + 2..].find("}}") else {
            // Unterminated token, keep the remainder as-is.
            break;
        };
        let key = &rest[start + 2..start + 2 + end];
        let token_end = start + 2 + end + 2;

        out.push_str(&rest[..start]);
        if let Some(value) = values.get(key) {
            out.push_str(&value.as_text());
        } else if key == CURRENT_DATE_KEY {
            out.push_str(&today.format("%Y-%m-%d").to_string());
        } else {
            // Lenient-template policy: no value, no error, the token survives.
            out.push_str(&rest[start..token_end]);
        }
        rest = &rest[token_end..];
    }

    out.push_str(rest);
    out
}
