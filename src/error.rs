//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Problems in the resource definitions themselves, caught before the server starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("duplicate path segment: {0}")]
    DuplicatePathSegment(String),
    #[error("duplicate collection: {0}")]
    DuplicateCollection(String),
    #[error("resource {resource}: duplicate field '{field}'")]
    DuplicateField { resource: String, field: String },
    #[error("resource {0}: at least one required field")]
    NoRequiredFields(String),
    #[error("resource {resource}: unknown sort field '{field}'")]
    UnknownSortField { resource: String, field: String },
    #[error("resource {resource}: invalid seed sample: {reason}")]
    InvalidSeed { resource: String, reason: String },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("mongodb: {0}")]
    Mongo(#[from] mongodb::error::Error),
    #[error("postgres: {0}")]
    Postgres(#[from] sqlx::Error),
    #[error("document encoding: {0}")]
    Encoding(String),
    #[error("invalid collection name: {0}")]
    InvalidCollection(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Fatal conditions during bootstrap. The process exits instead of serving traffic.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),
    #[error("invalid configuration {key}: {reason}")]
    InvalidConfig { key: &'static str, reason: String },
    #[error("unsupported store url scheme: {0}")]
    UnsupportedStore(String),
    #[error("store connection failed: {0}")]
    Connect(#[from] StoreError),
    #[error("store connection timed out after {0:?}")]
    ConnectTimeout(Duration),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingFields(_) | AppError::Validation(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Store(e) => {
                tracing::error!(error = %e, "store operation failed");
                "Database operation failed".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
