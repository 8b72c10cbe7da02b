use std::fmt::Write as _;

use axum::{
    extract::{Path, State},
    response::{Html, Response},
};

use crate::docgen::{self, docx::write_docx};
use crate::errors::AppError;
use crate::forms::escape;
use crate::initiatives::valid_schema_name;
use crate::routes::{serve_attachment, DOCX_CONTENT_TYPE};
use crate::state::AppState;
use crate::template::render_template;
use crate::ui;

use super::prompts::build_rfp_prompt;

fn check_schema_name(schema_name: &str) -> Result<(), AppError> {
    if valid_schema_name(schema_name) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Invalid schema name '{schema_name}'"
        )))
    }
}

/// GET /rfp/:id/:schema shows a loading screen, then redirects to the result page.
pub async fn handle_rfp_loading(
    Path((initiative_id, schema_name)): Path<(u64, String)>,
) -> Result<Html<String>, AppError> {
    check_schema_name(&schema_name)?;
    let content = ui::loading(
        "Generating RFP...",
        "Building the RFP from your initiative data. This may take a moment.",
        &format!("/rfp_result/{initiative_id}/{schema_name}"),
    );
    Ok(Html(ui::page("Generating RFP...", &content)))
}

/// GET /rfp_result/:id/:schema renders the RFP, saves a .docx copy and
/// shows the text with a download link.
pub async fn handle_rfp_result(
    State(state): State<AppState>,
    Path((initiative_id, schema_name)): Path<(u64, String)>,
) -> Result<Html<String>, AppError> {
    check_schema_name(&schema_name)?;
    let data = state
        .storage
        .load_initiative_data(initiative_id, &schema_name)?
        .ok_or_else(|| {
            AppError::NotFound(
                "Initiative files not found. Make sure both submissions exist.".to_string(),
            )
        })?;

    let (rfp_text, source_notice) = match state.storage.read_template(&schema_name)? {
        Some(template) => {
            tracing::info!(initiative_id, %schema_name, "rendering RFP from template");
            (
                render_template(&template, &data),
                format!("This RFP was generated from the '{schema_name}.txt' template."),
            )
        }
        None => {
            tracing::info!(initiative_id, %schema_name, "no template found, drafting RFP with AI");
            let prompt = build_rfp_prompt(&data)?;
            let text = state.llm()?.complete(&prompt).await?;
            (
                text,
                "This RFP was generated by AI. Review and edit as needed.".to_string(),
            )
        }
    };

    let document = docgen::document_from_text(&rfp_text);
    write_docx(&document, &state.storage.rfp_docx_path(initiative_id))?;

    let mut content = ui::progress(3);
    content.push_str("<h1>Generated RFP</h1>");
    content.push_str(&ui::output_pane(&rfp_text));
    content.push_str(&ui::download_link(
        &format!("/download_rfp/{initiative_id}"),
        "Download as Word (.docx)",
    ));
    let _ = write!(
        content,
        r#"<p class="notice">{}</p>"#,
        escape(&source_notice)
    );
    content.push_str(&ui::download_link(
        &format!("/find_vendors/{initiative_id}/{schema_name}"),
        "Find Vendors",
    ));
    content.push_str(&ui::download_link(
        &format!("/upload_vendor_responses/{initiative_id}"),
        "Upload Vendor Responses",
    ));
    Ok(Html(ui::page(
        &format!("RFP for Initiative #{initiative_id}"),
        &ui::container(&content),
    )))
}

/// GET /download_rfp/:id
pub async fn handle_download_rfp(
    State(state): State<AppState>,
    Path(initiative_id): Path<u64>,
) -> Result<Response, AppError> {
    serve_attachment(
        &state.storage.rfp_docx_path(initiative_id),
        &format!("initiative_{initiative_id}_RFP.docx"),
        DOCX_CONTENT_TYPE,
    )
    .await
}
