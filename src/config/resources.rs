//! Built-in resources served under `/api`.

use crate::config::types::{FieldDef, FieldType, ResourceDef, SortSpec, CREATED_AT};
use crate::model;
use serde_json::Value;

/// Path segment of the contact-message resource (`POST /api/contact`).
pub const CONTACT_PATH: &str = "contact";

pub fn students() -> ResourceDef {
    ResourceDef {
        name: "Student".into(),
        plural: "students".into(),
        path_segment: "students".into(),
        collection: "students".into(),
        fields: vec![
            FieldDef::required("name", FieldType::Text),
            FieldDef::required("age", FieldType::Integer).min(0),
            FieldDef::required("grade", FieldType::Text),
        ],
        sort: None,
        defaults: Vec::new(),
        created_at_input: None,
        seed: Some(model::seed_students),
        form_success: "student-added".into(),
        crud_routes: true,
    }
}

pub fn orders() -> ResourceDef {
    ResourceDef {
        name: "Order".into(),
        plural: "orders".into(),
        path_segment: "orders".into(),
        collection: "orders".into(),
        fields: vec![
            FieldDef::required("paperType", FieldType::Text),
            FieldDef::required("quantity", FieldType::Integer),
            FieldDef::required("salesperson", FieldType::Text),
            FieldDef::optional("deliveryDate", FieldType::Timestamp),
        ],
        sort: None,
        defaults: Vec::new(),
        created_at_input: None,
        seed: Some(model::seed_orders),
        form_success: "order-added".into(),
        crud_routes: true,
    }
}

pub fn posts() -> ResourceDef {
    ResourceDef {
        name: "Post".into(),
        plural: "posts".into(),
        path_segment: "posts".into(),
        collection: "posts".into(),
        fields: vec![
            FieldDef::required("author", FieldType::Text).alias("username"),
            FieldDef::required("content", FieldType::Text),
            FieldDef::optional("email", FieldType::Email),
            FieldDef::optional("status", FieldType::Text),
        ],
        sort: Some(SortSpec::descending(CREATED_AT)),
        defaults: Vec::new(),
        created_at_input: Some("date".into()),
        seed: Some(model::seed_posts),
        form_success: "post-added".into(),
        crud_routes: true,
    }
}

/// Contact messages get their own collection rather than sharing `posts`.
pub fn contact_messages() -> ResourceDef {
    ResourceDef {
        name: "Contact message".into(),
        plural: "contact messages".into(),
        path_segment: CONTACT_PATH.into(),
        collection: "contact_messages".into(),
        fields: vec![
            FieldDef::required("name", FieldType::Text),
            FieldDef::required("email", FieldType::Email),
            FieldDef::required("message", FieldType::Text),
            FieldDef::optional("status", FieldType::Text),
        ],
        sort: Some(SortSpec::descending(CREATED_AT)),
        defaults: vec![("status".into(), Value::String("pending".into()))],
        created_at_input: None,
        seed: None,
        form_success: "message-sent".into(),
        crud_routes: false,
    }
}

pub fn builtin() -> Vec<ResourceDef> {
    vec![students(), orders(), posts(), contact_messages()]
}
