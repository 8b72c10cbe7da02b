// Schema-driven form engine.
// Declarative field schemas (JSON-authored) become HTML input forms with
// section grouping and stored-value pre-fill. Rendering never emits raw
// untrusted text into markup.

pub mod render;
pub mod schema;

pub use render::{escape, render_form};
pub use schema::{FieldKind, FieldSchema, FormSchema};
