//! Request validation and shaping from resource definitions.

use crate::config::{FieldDef, FieldType, ResourceDef, CREATED_AT};
use crate::error::AppError;
use crate::model::timestamp;
use crate::store::Document;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

pub const INVALID_EMAIL: &str = "Invalid email format";

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a create payload and build the document to insert, `createdAt` included.
    pub fn validate_create(def: &ResourceDef, body: &Document, now: DateTime<Utc>) -> Result<Document, AppError> {
        check_required(def, body)?;
        let mut doc = coerce_present(def, body)?;
        for (name, value) in &def.defaults {
            doc.entry(name.clone()).or_insert_with(|| value.clone());
        }
        let created_at = match def.created_at_input.as_deref().and_then(|name| supplied(body.get(name))) {
            Some(raw) => raw
                .as_str()
                .and_then(timestamp::parse)
                .ok_or_else(|| AppError::Validation("date must be a valid date".into()))?,
            None => now,
        };
        doc.insert(CREATED_AT.into(), Value::String(timestamp::format(&created_at)));
        Ok(doc)
    }

    /// Full replace: every required field must be supplied. Supplied optional fields are set too.
    pub fn validate_replace(def: &ResourceDef, body: &Document) -> Result<Document, AppError> {
        check_required(def, body)?;
        coerce_present(def, body)
    }

    /// Partial replace: only supplied fields are validated and returned. Unknown fields are dropped.
    pub fn validate_partial(def: &ResourceDef, body: &Document) -> Result<Document, AppError> {
        for f in &def.fields {
            if let Some((input, value)) = lookup(f, body) {
                if supplied(Some(value)).is_none() {
                    return Err(AppError::Validation(format!("{} must not be empty", input)));
                }
            }
        }
        coerce_present(def, body)
    }
}

/// The first input name of `field` present in `body`, with its value.
fn lookup<'a>(field: &'a FieldDef, body: &'a Document) -> Option<(&'a str, &'a Value)> {
    field
        .input_names()
        .find_map(|name| body.get(name).map(|v| (name, v)))
}

/// `Some` when the value counts as present: not null and not a blank string.
fn supplied(value: Option<&Value>) -> Option<&Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(v) => Some(v),
    }
}

fn check_required(def: &ResourceDef, body: &Document) -> Result<(), AppError> {
    let missing: Vec<String> = def
        .required_fields()
        .filter(|f| supplied(lookup(f, body).map(|(_, v)| v)).is_none())
        .map(|f| f.name.clone())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::MissingFields(missing))
    }
}

/// Coerce every supplied field of `def` into a new document keyed by canonical names.
fn coerce_present(def: &ResourceDef, body: &Document) -> Result<Document, AppError> {
    let mut doc = Document::new();
    for f in &def.fields {
        if let Some(value) = supplied(lookup(f, body).map(|(_, v)| v)) {
            doc.insert(f.name.clone(), coerce(f, value)?);
        }
    }
    Ok(doc)
}

/// Convert a supplied value to the stored representation of the field's type.
pub fn coerce(field: &FieldDef, value: &Value) -> Result<Value, AppError> {
    match field.ty {
        FieldType::Text => Ok(match value {
            Value::String(s) => Value::String(s.trim().to_string()),
            Value::Number(n) => Value::String(n.to_string()),
            Value::Bool(b) => Value::String(b.to_string()),
            _ => return Err(AppError::Validation(format!("{} must be text", field.name))),
        }),
        FieldType::Integer => {
            let n = as_integer(value)
                .ok_or_else(|| AppError::Validation(format!("{} must be an integer", field.name)))?;
            if let Some(min) = field.min {
                if n < min {
                    return Err(AppError::Validation(format!("{} must be at least {}", field.name, min)));
                }
            }
            Ok(Value::Number(n.into()))
        }
        FieldType::Timestamp => value
            .as_str()
            .and_then(timestamp::parse)
            .map(|ts| Value::String(timestamp::format(&ts)))
            .ok_or_else(|| AppError::Validation(format!("{} must be a valid date", field.name))),
        FieldType::Email => {
            let s = value.as_str().map(str::trim).unwrap_or_default();
            if is_email(s)? {
                Ok(Value::String(s.to_string()))
            } else {
                Err(AppError::Validation(INVALID_EMAIL.into()))
            }
        }
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Compiled on first use. A compile failure is returned from every check.
fn email_regex() -> Result<&'static Regex, AppError> {
    static EMAIL: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(EMAIL_PATTERN))
        .as_ref()
        .map_err(|e| AppError::Validation(format!("invalid pattern for email: {}", e)))
}

pub fn is_email(s: &str) -> Result<bool, AppError> {
    Ok(email_regex()?.is_match(s))
}
