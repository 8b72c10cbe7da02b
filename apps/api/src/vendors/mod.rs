// Vendor side of the workflow: AI vendor suggestions, response uploads with
// text extraction, and the AI-scored comparison saved as txt, docx and xlsx.

pub mod extract;
pub mod handlers;
mod prompts;

/// Inclusive bounds on how many response files a comparison accepts.
pub const MIN_VENDOR_FILES: usize = 2;
pub const MAX_VENDOR_FILES: usize = 7;
