use std::fmt::Write as _;

use anyhow::anyhow;
use axum::{
    extract::{Path, State},
    response::{Html, Json, Redirect},
    Form,
};

use crate::errors::AppError;
use crate::forms::{escape, render_form, FormSchema};
use crate::initiatives::{detail_schema_for, valid_schema_name, MAIN_SCHEMA};
use crate::state::AppState;
use crate::ui;
use crate::values::ValuesRecord;

/// Loads a schema that must exist for the app to function.
fn require_schema(state: &AppState, name: &str) -> Result<FormSchema, AppError> {
    state
        .storage
        .load_schema(name)
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::Internal(anyhow!("Form schema '{name}' is missing")))
}

/// GET /
pub async fn handle_main_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let schema = require_schema(&state, MAIN_SCHEMA)?;
    let form = render_form(&schema, "/submit", &ValuesRecord::new());
    let content = ui::container(&format!("{}{form}", ui::progress(1)));
    Ok(Html(ui::page("New Initiative", &content)))
}

/// GET /edit/:id serves the main form pre-filled with the initiative data.
pub async fn handle_edit_form(
    State(state): State<AppState>,
    Path(initiative_id): Path<u64>,
) -> Result<Html<String>, AppError> {
    let defaults = state
        .storage
        .load_base_submission(initiative_id)
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound(format!("Initiative {initiative_id} not found")))?;

    let schema = require_schema(&state, MAIN_SCHEMA)?;
    let action = format!("/update/{initiative_id}");
    let form = render_form(&schema, &action, &defaults);
    let content = ui::container(&format!("{}{form}", ui::progress(1)));
    Ok(Html(ui::page(
        &format!("Edit Initiative #{initiative_id}"),
        &content,
    )))
}

/// GET /initiatives
pub async fn handle_list_initiatives(
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let initiatives = state.storage.list_initiatives().map_err(AppError::Internal)?;

    let mut html = String::from("<h1>All Initiatives</h1>");
    if initiatives.is_empty() {
        html.push_str(r#"<p>No initiatives found. <a href="/">Create one now</a>.</p>"#);
    } else {
        html.push_str(r#"<ul class="initiative-list">"#);
        for record in &initiatives {
            let id = record.get_text("initiative_id").unwrap_or_default();
            let request_type = record.get_text("request_type").unwrap_or("N/A".into());
            let service = record
                .get("services_needed")
                .and_then(|v| v.first())
                .unwrap_or("N/A");

            let _ = write!(
                html,
                r#"<li><div class="info">Initiative <strong>#{id}</strong> &mdash; {} / {}</div><div class="actions">"#,
                escape(&request_type),
                escape(service),
            );
            let _ = write!(html, r#"<a href="/edit/{id}">Edit</a>"#);
            if let Some(schema) = detail_schema_for(record) {
                let _ = write!(html, r#"<a href="/rfp/{id}/{schema}">Generate RFP</a>"#);
            }
            let _ = write!(
                html,
                r#"<a href="/upload_vendor_responses/{id}">Upload Responses</a><a href="/compare_vendors/{id}">Compare</a></div></li>"#
            );
        }
        html.push_str("</ul>");
    }

    Ok(Html(ui::page("All Initiatives", &ui::container(&html))))
}

/// POST /submit saves the base submission and continues to the mapped
/// detail form, or a confirmation when no detail schema applies.
pub async fn handle_submit(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Html<String>, AppError> {
    let mut record = ValuesRecord::from_pairs(pairs);
    let initiative_id = state
        .storage
        .next_initiative_id()
        .map_err(AppError::Internal)?;
    record.insert("initiative_id", initiative_id.to_string());
    state
        .storage
        .save_submission(initiative_id, None, &record)
        .map_err(AppError::Internal)?;

    let Some(schema_name) = detail_schema_for(&record) else {
        let mut html = ui::progress(1);
        let _ = write!(
            html,
            r#"<h1>Submission saved &mdash; Initiative {initiative_id}</h1>
<p class="notice">No detailed schema mapped for this Request Type &amp; Service. You can:</p>
<p><a href="/initiative/{initiative_id}">View submission JSON</a></p>"#
        );
        return Ok(Html(ui::page(
            &format!("Initiative #{initiative_id}"),
            &ui::container(&html),
        )));
    };

    let schema = state
        .storage
        .load_schema(schema_name)
        .map_err(AppError::Internal)?
        .ok_or_else(|| {
            AppError::Internal(anyhow!("Detail schema '{schema_name}' is missing"))
        })?;

    let action = format!("/submit/{schema_name}/{initiative_id}");
    let form = render_form(&schema, &action, &ValuesRecord::new());
    let content = ui::container(&format!("{}{form}", ui::progress(2)));
    Ok(Html(ui::page(
        &format!("Details for Initiative #{initiative_id}"),
        &content,
    )))
}

/// POST /update/:id overwrites the base submission, keeping the id.
pub async fn handle_update(
    State(state): State<AppState>,
    Path(initiative_id): Path<u64>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let mut record = ValuesRecord::from_pairs(pairs);
    record.insert("initiative_id", initiative_id.to_string());
    state
        .storage
        .save_submission(initiative_id, None, &record)
        .map_err(AppError::Internal)?;
    Ok(Redirect::to("/initiatives"))
}

/// POST /submit/:schema_name/:id saves the detail submission.
pub async fn handle_submit_details(
    State(state): State<AppState>,
    Path((schema_name, initiative_id)): Path<(String, u64)>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Html<String>, AppError> {
    if !valid_schema_name(&schema_name) {
        return Err(AppError::Validation(format!(
            "Invalid schema name '{schema_name}'"
        )));
    }
    let record = ValuesRecord::from_pairs(pairs);
    state
        .storage
        .save_submission(initiative_id, Some(&schema_name), &record)
        .map_err(AppError::Internal)?;

    let mut html = ui::progress(2);
    let _ = write!(
        html,
        r#"<h1>Details saved for Initiative {initiative_id}</h1>
<p class="notice">You can now generate the RFP enhanced by the AI.</p>
{}{}
<p style="margin-top:10px;"><a href="/initiatives">Back to All Initiatives</a></p>"#,
        ui::download_link(
            &format!("/find_vendors/{initiative_id}/{schema_name}"),
            "Find Vendors"
        ),
        ui::download_link(&format!("/rfp/{initiative_id}/{schema_name}"), "Generate RFP"),
    );
    Ok(Html(ui::page(
        &format!("Initiative #{initiative_id} Saved"),
        &ui::container(&html),
    )))
}

/// GET /initiative/:id returns the raw base submission.
pub async fn handle_get_initiative(
    State(state): State<AppState>,
    Path(initiative_id): Path<u64>,
) -> Result<Json<ValuesRecord>, AppError> {
    let record = state
        .storage
        .load_base_submission(initiative_id)
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound(format!("Initiative {initiative_id} not found")))?;
    Ok(Json(record))
}
