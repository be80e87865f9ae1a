//! Contact form endpoint. Messages are stored and logged; no email is sent.

use crate::config::{resources::CONTACT_PATH, ID_FIELD};
use crate::error::AppError;
use crate::handlers::resource::json_body;
use crate::response;
use crate::service::CrudService;
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, response::IntoResponse, Json};
use serde_json::Value;

pub const CONTACT_ACK: &str = "Message received! Kelly will get back to you soon.";

pub async fn submit(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let resource = state
        .registry
        .by_path(CONTACT_PATH)
        .ok_or_else(|| AppError::NotFound("contact messages are not configured".into()))?;
    let body = json_body(body)?;
    let doc = CrudService::create(state.store.as_ref(), resource, &body).await?;
    let name = doc.get("name").and_then(Value::as_str).unwrap_or_default();
    let email = doc.get("email").and_then(Value::as_str).unwrap_or_default();
    tracing::info!(%name, %email, "contact form submitted");
    Ok(response::created(serde_json::json!({
        ID_FIELD: doc.get(ID_FIELD),
        "message": CONTACT_ACK,
    })))
}
