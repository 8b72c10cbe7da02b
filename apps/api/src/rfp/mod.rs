// RFP document generation: template-filled when a template exists for the
// detail schema, AI-drafted otherwise. The result is shown inline and saved
// as a .docx for download.

pub mod handlers;
mod prompts;
