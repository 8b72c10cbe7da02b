use std::collections::BTreeMap;
use std::fmt::Write as _;

use axum::{
    extract::{Multipart, Path, State},
    response::{Html, Redirect, Response},
};

use crate::comparison::{render_comparison_document, render_comparison_table, ComparisonRecord};
use crate::docgen::{docx::write_docx, xlsx::write_xlsx, DocumentModel};
use crate::errors::AppError;
use crate::initiatives::valid_schema_name;
use crate::llm_client::strip_json_fences;
use crate::routes::{serve_attachment, DOCX_CONTENT_TYPE, XLSX_CONTENT_TYPE};
use crate::state::AppState;
use crate::ui;

use super::extract::extract_text;
use super::prompts::{build_compare_prompt, build_find_vendors_prompt};
use super::{MAX_VENDOR_FILES, MIN_VENDOR_FILES};

/// GET /find_vendors/:id/:schema shows the loading screen for vendor discovery.
pub async fn handle_find_vendors_loading(
    Path((initiative_id, schema_name)): Path<(u64, String)>,
) -> Result<Html<String>, AppError> {
    if !valid_schema_name(&schema_name) {
        return Err(AppError::Validation(format!(
            "Invalid schema name '{schema_name}'"
        )));
    }
    let content = ui::loading(
        "Finding Potential Vendors...",
        "The AI is analyzing your requirements to suggest suitable vendors. This may take a moment.",
        &format!("/find_vendors_result/{initiative_id}/{schema_name}"),
    );
    Ok(Html(ui::page("Finding Vendors...", &content)))
}

/// GET /find_vendors_result/:id/:schema renders the AI-suggested vendor shortlist.
pub async fn handle_find_vendors_result(
    State(state): State<AppState>,
    Path((initiative_id, schema_name)): Path<(u64, String)>,
) -> Result<Html<String>, AppError> {
    if !valid_schema_name(&schema_name) {
        return Err(AppError::Validation(format!(
            "Invalid schema name '{schema_name}'"
        )));
    }
    let data = state
        .storage
        .load_initiative_data(initiative_id, &schema_name)?
        .ok_or_else(|| AppError::NotFound("Initiative data not found.".to_string()))?;

    let prompt = build_find_vendors_prompt(&data)?;
    let suggestions = state.llm()?.complete(&prompt).await?;
    tracing::info!(initiative_id, "received vendor suggestions");

    let mut content = String::from("<h1>Suggested Vendors</h1>");
    content.push_str(&ui::output_pane(&suggestions));
    content.push_str(
        r#"<p class="notice">These vendors were suggested by AI based on your input. Further vetting is recommended.</p>"#,
    );
    let _ = write!(
        content,
        r#"<p><a href="/rfp_result/{initiative_id}/{schema_name}">Back to RFP</a></p>"#
    );
    Ok(Html(ui::page(
        &format!("Vendors for Initiative #{initiative_id}"),
        &ui::container(&content),
    )))
}

/// GET /upload_vendor_responses/:id serves the response upload form.
pub async fn handle_upload_form(Path(initiative_id): Path<u64>) -> Html<String> {
    let content = format!(
        r#"<h1>Upload Vendor Responses</h1>
<form action="/upload_vendor_responses/{initiative_id}" method="post" enctype="multipart/form-data">
<p>Please upload between <b>{MIN_VENDOR_FILES}</b> and <b>{MAX_VENDOR_FILES}</b> vendor response files (PDF, DOCX, or TXT).</p>
<input type="file" name="files" multiple required accept=".pdf,.docx,.txt">
<br><br>
<button type="submit">Upload &amp; Compare</button>
</form>
<p class="notice">Each vendor response will be analyzed and compared using AI.</p>"#
    );
    Html(ui::page(
        &format!("Upload Responses for Initiative #{initiative_id}"),
        &ui::container(&content),
    ))
}

/// POST /upload_vendor_responses/:id stores the files, extracts their
/// text into one combined JSON document, then redirects to the comparison.
pub async fn handle_upload_files(
    State(state): State<AppState>,
    Path(initiative_id): Path<u64>,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    let mut uploads: Vec<(String, bytes::Bytes)> = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart request: {e}")))?
    {
        if field.name() != Some("files") {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read '{filename}': {e}")))?;
        uploads.push((filename, bytes));
    }

    if uploads.len() < MIN_VENDOR_FILES || uploads.len() > MAX_VENDOR_FILES {
        return Err(AppError::Validation(format!(
            "You must upload between {MIN_VENDOR_FILES} and {MAX_VENDOR_FILES} vendor responses. You uploaded {}.",
            uploads.len()
        )));
    }

    let mut combined = BTreeMap::new();
    for (filename, bytes) in &uploads {
        let text = extract_text(filename, bytes)?;
        state
            .storage
            .save_vendor_file(initiative_id, filename, bytes)?;
        combined.insert(filename.clone(), text.trim().to_string());
    }
    state
        .storage
        .write_combined_responses(initiative_id, &combined)?;
    tracing::info!(
        initiative_id,
        files = uploads.len(),
        "stored vendor responses"
    );

    Ok(Redirect::to(&format!("/compare_vendors/{initiative_id}")))
}

/// GET /compare_vendors/:id runs the AI comparison over the combined
/// responses and saves txt, docx and xlsx renditions of the result.
pub async fn handle_compare_vendors(
    State(state): State<AppState>,
    Path(initiative_id): Path<u64>,
) -> Result<Html<String>, AppError> {
    let responses = state
        .storage
        .read_combined_responses(initiative_id)?
        .ok_or_else(|| AppError::NotFound("No vendor responses uploaded yet.".to_string()))?;

    let prompt = build_compare_prompt(initiative_id, &responses)?;
    let raw = state.llm()?.complete(&prompt).await?;

    // Keep the raw model output even if parsing fails below.
    std::fs::write(state.storage.comparison_txt_path(initiative_id), &raw)
        .map_err(|e| AppError::Internal(e.into()))?;

    let record: ComparisonRecord = serde_json::from_str(strip_json_fences(&raw))
        .map_err(|e| AppError::Llm(format!("Comparison output was not valid JSON: {e}")))?;

    let mut document = DocumentModel::new();
    document.heading(1, format!("Vendor Comparison for Initiative #{initiative_id}"));
    document.append(render_comparison_document(&record));
    write_docx(&document, &state.storage.comparison_docx_path(initiative_id))?;
    write_xlsx(
        &render_comparison_table(&record),
        &state.storage.comparison_xlsx_path(initiative_id),
    )?;
    tracing::info!(
        initiative_id,
        vendors = record.vendors.len(),
        "comparison complete"
    );

    let pretty = serde_json::to_string_pretty(&record).map_err(anyhow::Error::from)?;
    let mut content = String::from("<h1>Vendor Comparison Results</h1>");
    content.push_str(&ui::output_pane(&pretty));
    content.push_str(&ui::download_link(
        &format!("/download_comparison_docx/{initiative_id}"),
        "Download as Word (.docx)",
    ));
    content.push_str(&ui::download_link(
        &format!("/download_comparison_xlsx/{initiative_id}"),
        "Download as Excel (.xlsx)",
    ));
    content.push_str(&ui::download_link(
        &format!("/download_comparison/{initiative_id}"),
        "Download Results (.txt)",
    ));
    content.push_str(r#"<p><a href="/initiatives">Back to Initiatives</a></p>"#);
    Ok(Html(ui::page(
        &format!("Comparison for Initiative #{initiative_id}"),
        &ui::container(&content),
    )))
}

/// GET /download_comparison/:id
pub async fn handle_download_comparison_txt(
    State(state): State<AppState>,
    Path(initiative_id): Path<u64>,
) -> Result<Response, AppError> {
    serve_attachment(
        &state.storage.comparison_txt_path(initiative_id),
        &format!("initiative_{initiative_id}_comparison.txt"),
        "text/plain; charset=utf-8",
    )
    .await
}

/// GET /download_comparison_docx/:id
pub async fn handle_download_comparison_docx(
    State(state): State<AppState>,
    Path(initiative_id): Path<u64>,
) -> Result<Response, AppError> {
    serve_attachment(
        &state.storage.comparison_docx_path(initiative_id),
        &format!("initiative_{initiative_id}_comparison.docx"),
        DOCX_CONTENT_TYPE,
    )
    .await
}

/// GET /download_comparison_xlsx/:id
pub async fn handle_download_comparison_xlsx(
    State(state): State<AppState>,
    Path(initiative_id): Path<u64>,
) -> Result<Response, AppError> {
    serve_attachment(
        &state.storage.comparison_xlsx_path(initiative_id),
        &format!("initiative_{initiative_id}_comparison.xlsx"),
        XLSX_CONTENT_TYPE,
    )
    .await
}
