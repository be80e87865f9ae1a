//! Response helpers. Records are returned bare; acknowledgements carry a `message`.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inserted_count: Option<u64>,
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn message(message: impl Into<String>) -> (StatusCode, Json<MessageBody>) {
    ok(MessageBody {
        message: message.into(),
        deleted_count: None,
        inserted_count: None,
    })
}

pub fn deleted(message: impl Into<String>, count: u64) -> (StatusCode, Json<MessageBody>) {
    ok(MessageBody {
        message: message.into(),
        deleted_count: Some(count),
        inserted_count: None,
    })
}

pub fn inserted(message: impl Into<String>, count: u64) -> (StatusCode, Json<MessageBody>) {
    ok(MessageBody {
        message: message.into(),
        deleted_count: None,
        inserted_count: Some(count),
    })
}

pub fn error_body(message: impl Into<String>) -> serde_json::Value {
    serde_json::json!({ "error": message.into() })
}
