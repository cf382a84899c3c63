//! Add Transaction HTMX endpoints
//!
//! Every operation posts the whole form, so the session's draft is first
//! brought in line with what the browser shows, then the operation runs.

use super::page::render_form;
use crate::routes::parse_form_body;
use crate::{AppState, WebError};
use axum::extract::{Path, State};
use axum::response::Html;
use investatrack_core::form::fields;
use investatrack_core::{FormHandle, TransactionForm};

async fn session(state: &AppState, id: &str) -> Result<FormHandle, WebError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| WebError::SessionExpired { id: id.to_string() })
}

fn apply_posted(form: &mut TransactionForm, posted: &[(String, String)]) {
    form.apply_fields(posted.iter().map(|(k, v)| (k.as_str(), v.as_str())));
}

/// HTMX: Stock selection changed - prefill the price
pub async fn htmx_select_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: String,
) -> Result<Html<String>, WebError> {
    let handle = session(&state, &id).await?;
    let mut form = handle.lock().await;
    let posted = parse_form_body(&body);
    apply_posted(&mut form, &posted);

    let stock_id = posted
        .iter()
        .find(|(name, _)| name == fields::STOCK_ID)
        .map(|(_, value)| value.as_str())
        .unwrap_or("");
    form.select_stock(stock_id);
    Ok(Html(render_form(&id, &form)))
}

/// HTMX: Submit the draft as a buy or sell
pub async fn htmx_form_submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: String,
) -> Result<Html<String>, WebError> {
    let handle = session(&state, &id).await?;
    let mut form = handle.lock().await;
    apply_posted(&mut form, &parse_form_body(&body));
    form.submit(state.api.as_ref()).await;
    Ok(Html(render_form(&id, &form)))
}

/// HTMX: Clear the draft and message
pub async fn htmx_form_reset(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: String,
) -> Result<Html<String>, WebError> {
    let handle = session(&state, &id).await?;
    let mut form = handle.lock().await;
    // keeps the type the user has selected
    apply_posted(&mut form, &parse_form_body(&body));
    form.reset();
    Ok(Html(render_form(&id, &form)))
}

/// HTMX: Backend data changed - start this session over with fresh lists
pub async fn htmx_form_reload(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, WebError> {
    let handle = state
        .sessions
        .reset(&id, TransactionForm::new())
        .await
        .ok_or_else(|| WebError::SessionExpired { id: id.clone() })?;
    let mut form = handle.lock().await;
    form.initialize(state.api.as_ref()).await;
    Ok(Html(render_form(&id, &form)))
}
