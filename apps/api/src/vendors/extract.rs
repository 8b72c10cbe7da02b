//! Plain-text extraction from uploaded vendor responses.
//! PDF and DOCX get real extraction; everything else is treated as text.

use docx_rs::{DocumentChild, ParagraphChild, RunChild};

use crate::errors::AppError;

/// Extracts the text of an uploaded file, dispatching on its extension.
/// Unsupported or corrupt PDF/DOCX content is a 422, not a crash.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String, AppError> {
    let lower = filename.to_ascii_lowercase();
    if lower.ends_with(".pdf") {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            AppError::UnprocessableEntity(format!("Could not read PDF '{filename}': {e}"))
        })
    } else if lower.ends_with(".docx") {
        docx_text(bytes).map_err(|e| {
            AppError::UnprocessableEntity(format!("Could not read DOCX '{filename}': {e}"))
        })
    } else {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

fn docx_text(bytes: &[u8]) -> Result<String, docx_rs::ReaderError> {
    let docx = docx_rs::read_docx(bytes)?;
    let mut text = String::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            for p_child in &paragraph.children {
                if let ParagraphChild::Run(run) = p_child {
                    for r_child in &run.children {
                        if let RunChild::Text(t) = r_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }
    Ok(text)
}
