//! Resource CRUD handlers: create, list, read, replace, patch, delete, seed, cleanup, form.
//!
//! The definition of the resource being served arrives as an `Extension`, installed
//! once per nested router in `routes::resource`.

use crate::config::ResourceDef;
use crate::error::AppError;
use crate::response;
use crate::service::CrudService;
use crate::state::AppState;
use crate::store::Document;
use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        Path, State,
    },
    response::{IntoResponse, Redirect},
    Extension, Form, Json,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Landing page for traditional (non-JS) form submissions.
pub const FORMS_PAGE: &str = "/traditional-forms.html";

fn body_to_map(value: Value) -> Result<Document, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

/// Unwrap a JSON body, turning extractor rejections (bad syntax, wrong content type)
/// into the usual error envelope.
pub fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Document, AppError> {
    let Json(value) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    body_to_map(value)
}

pub async fn list(
    State(state): State<AppState>,
    Extension(resource): Extension<Arc<ResourceDef>>,
) -> Result<impl IntoResponse, AppError> {
    let rows = CrudService::list(state.store.as_ref(), &resource).await?;
    Ok(response::ok(rows))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(resource): Extension<Arc<ResourceDef>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = json_body(body)?;
    let doc = CrudService::create(state.store.as_ref(), &resource, &body).await?;
    Ok(response::created(doc))
}

pub async fn read(
    State(state): State<AppState>,
    Extension(resource): Extension<Arc<ResourceDef>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let doc = CrudService::read(state.store.as_ref(), &resource, &id).await?;
    Ok(response::ok(doc))
}

pub async fn replace(
    State(state): State<AppState>,
    Extension(resource): Extension<Arc<ResourceDef>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = json_body(body)?;
    CrudService::replace(state.store.as_ref(), &resource, &id, &body).await?;
    Ok(response::message(format!("{} updated", resource.name)))
}

pub async fn patch(
    State(state): State<AppState>,
    Extension(resource): Extension<Arc<ResourceDef>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = json_body(body)?;
    CrudService::patch(state.store.as_ref(), &resource, &id, &body).await?;
    Ok(response::message(format!("{} updated", resource.name)))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(resource): Extension<Arc<ResourceDef>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    CrudService::delete(state.store.as_ref(), &resource, &id).await?;
    Ok(response::message(format!("{} deleted", resource.name)))
}

pub async fn seed(
    State(state): State<AppState>,
    Extension(resource): Extension<Arc<ResourceDef>>,
) -> Result<impl IntoResponse, AppError> {
    let inserted = CrudService::seed(state.store.as_ref(), &resource).await?;
    Ok(response::inserted(format!("{} seeded", capitalize(&resource.plural)), inserted))
}

pub async fn cleanup(
    State(state): State<AppState>,
    Extension(resource): Extension<Arc<ResourceDef>>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = CrudService::delete_all(state.store.as_ref(), &resource).await?;
    Ok(response::deleted(format!("All {} deleted", resource.plural), deleted))
}

/// Create from an urlencoded form and answer with a redirect carrying the outcome.
pub async fn create_from_form(
    State(state): State<AppState>,
    Extension(resource): Extension<Arc<ResourceDef>>,
    fields: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Redirect {
    let Form(fields) = match fields {
        Ok(fields) => fields,
        Err(e) => {
            tracing::warn!(error = %e, collection = %resource.collection, "form body rejected");
            return form_outcome("error=invalid-fields");
        }
    };
    let body: Document = fields.into_iter().map(|(k, v)| (k, Value::String(v))).collect();
    let query = match CrudService::create(state.store.as_ref(), &resource, &body).await {
        Ok(_) => format!("success={}", resource.form_success),
        Err(AppError::MissingFields(_)) => "error=missing-fields".to_string(),
        Err(AppError::Store(e)) => {
            tracing::error!(error = %e, collection = %resource.collection, "form insert failed");
            "error=database-error".to_string()
        }
        Err(e) => {
            tracing::warn!(error = %e, collection = %resource.collection, "form rejected");
            "error=invalid-fields".to_string()
        }
    };
    form_outcome(&query)
}

fn form_outcome(query: &str) -> Redirect {
    Redirect::to(&format!("{}?{}", FORMS_PAGE, query))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
