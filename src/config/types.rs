//! Declarative resource definitions: collection, fields, ordering, seed data.

use crate::store::Document;
use chrono::{DateTime, Utc};

/// Identity key in every stored and returned document.
pub const ID_FIELD: &str = "_id";
/// Server-assigned creation timestamp.
pub const CREATED_AT: &str = "createdAt";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldType {
    Text,
    /// Stored as a JSON integer; numeric strings are coerced.
    Integer,
    /// Stored as an RFC 3339 UTC string with millisecond precision.
    Timestamp,
    /// Text that must look like an email address.
    Email,
}

#[derive(Clone, Debug)]
pub struct FieldDef {
    pub name: String,
    pub ty: FieldType,
    pub required: bool,
    /// Alternate input names accepted for this field (e.g. `username` for `author`).
    pub aliases: Vec<String>,
    /// Inclusive lower bound for integer fields.
    pub min: Option<i64>,
}

impl FieldDef {
    pub fn required(name: &str, ty: FieldType) -> Self {
        Self {
            name: name.to_string(),
            ty,
            required: true,
            aliases: Vec::new(),
            min: None,
        }
    }

    pub fn optional(name: &str, ty: FieldType) -> Self {
        Self {
            required: false,
            ..Self::required(name, ty)
        }
    }

    pub fn alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    pub fn min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    /// Input names this field answers to, canonical name first.
    pub fn input_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn descending(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: SortDirection::Descending,
        }
    }
}

/// Builds the canonical sample set, stamped relative to `now`.
pub type SeedFn = fn(DateTime<Utc>) -> Result<Vec<Document>, serde_json::Error>;

#[derive(Clone, Debug)]
pub struct ResourceDef {
    /// Singular display name used in messages ("Student").
    pub name: String,
    /// Plural display name ("students").
    pub plural: String,
    pub path_segment: String,
    pub collection: String,
    pub fields: Vec<FieldDef>,
    /// List ordering; `None` keeps the store's natural order.
    pub sort: Option<SortSpec>,
    /// Values stored when the caller leaves the field out.
    pub defaults: Vec<(String, serde_json::Value)>,
    /// Optional input field that overrides `createdAt` on create.
    pub created_at_input: Option<String>,
    pub seed: Option<SeedFn>,
    /// `success=` flag for form submissions.
    pub form_success: String,
    /// Whether the templated CRUD routes are mounted for this resource.
    pub crud_routes: bool,
}

impl ResourceDef {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.required)
    }

    pub fn not_found(&self) -> String {
        format!("{} not found", self.name)
    }
}
