//! Demo echo endpoints. None of these touch the store.

use crate::error::AppError;
use axum::{
    body::Bytes,
    extract::{Path, Query},
    Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;

pub async fn spencer() -> Json<Value> {
    Json(json!({ "myVar": "This is a message from the API for Spencer." }))
}

/// GET /api/query?a=1&b=2: echo the query string as an object.
pub async fn query(Query(params): Query<HashMap<String, String>>) -> Json<HashMap<String, String>> {
    Json(params)
}

/// GET /api/url/:x: echo the path parameter.
pub async fn url_param(Path(x): Path<String>) -> Json<Value> {
    Json(json!({ "param": x }))
}

/// GET or POST /api/body: echo a JSON body; an empty body echoes `{}`.
pub async fn body(bytes: Bytes) -> Result<Json<Value>, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Json(json!({})));
    }
    serde_json::from_slice(&bytes)
        .map(Json)
        .map_err(|e| AppError::BadRequest(format!("body is not valid JSON: {}", e)))
}
