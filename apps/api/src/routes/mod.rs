pub mod health;

use std::path::Path;

use axum::{
    extract::DefaultBodyLimit,
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::initiatives::handlers as initiatives;
use crate::rfp::handlers as rfp;
use crate::state::AppState;
use crate::vendors::handlers as vendors;

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Vendor response uploads can carry several PDFs, so the default 2 MB
/// multipart cap is too small.
const UPLOAD_BODY_LIMIT: usize = 25 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Intake forms
        .route("/", get(initiatives::handle_main_form))
        .route("/submit", post(initiatives::handle_submit))
        .route(
            "/submit/:schema_name/:initiative_id",
            post(initiatives::handle_submit_details),
        )
        .route("/edit/:initiative_id", get(initiatives::handle_edit_form))
        .route("/update/:initiative_id", post(initiatives::handle_update))
        .route("/initiatives", get(initiatives::handle_list_initiatives))
        .route(
            "/initiative/:initiative_id",
            get(initiatives::handle_get_initiative),
        )
        // RFP generation
        .route(
            "/rfp/:initiative_id/:schema_name",
            get(rfp::handle_rfp_loading),
        )
        .route(
            "/rfp_result/:initiative_id/:schema_name",
            get(rfp::handle_rfp_result),
        )
        .route(
            "/download_rfp/:initiative_id",
            get(rfp::handle_download_rfp),
        )
        // Vendor discovery and comparison
        .route(
            "/find_vendors/:initiative_id/:schema_name",
            get(vendors::handle_find_vendors_loading),
        )
        .route(
            "/find_vendors_result/:initiative_id/:schema_name",
            get(vendors::handle_find_vendors_result),
        )
        .route(
            "/upload_vendor_responses/:initiative_id",
            get(vendors::handle_upload_form).post(vendors::handle_upload_files),
        )
        .route(
            "/compare_vendors/:initiative_id",
            get(vendors::handle_compare_vendors),
        )
        .route(
            "/download_comparison/:initiative_id",
            get(vendors::handle_download_comparison_txt),
        )
        .route(
            "/download_comparison_docx/:initiative_id",
            get(vendors::handle_download_comparison_docx),
        )
        .route(
            "/download_comparison_xlsx/:initiative_id",
            get(vendors::handle_download_comparison_xlsx),
        )
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .with_state(state)
}

/// Serves a generated file as a download attachment. Missing files are a 404,
/// which covers "download before generate" links.
pub async fn serve_attachment(
    path: &Path,
    filename: &str,
    content_type: &str,
) -> Result<Response, AppError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!("{filename} not found.")));
        }
        Err(e) => return Err(AppError::Internal(e.into())),
    };
    let headers = [
        (header::CONTENT_TYPE, content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, bytes).into_response())
}
