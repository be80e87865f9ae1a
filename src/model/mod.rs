//! Typed records for each collection. Optional fields are `Option` and are
//! omitted from stored documents when absent.

pub mod timestamp;

use crate::store::Document;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub age: i64,
    pub grade: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub paper_type: String,
    pub quantity: i64,
    pub salesperson: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub author: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub message: String,
    pub status: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Serialize a record into a store document.
pub fn to_document<T: Serialize>(record: &T) -> Result<Document, serde_json::Error> {
    match serde_json::to_value(record)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(serde::ser::Error::custom(format!(
            "record serialized to {} instead of an object",
            other
        ))),
    }
}

fn to_documents<T: Serialize>(records: &[T]) -> Result<Vec<Document>, serde_json::Error> {
    records.iter().map(to_document).collect()
}

pub fn student_samples(now: DateTime<Utc>) -> Vec<Student> {
    [("Alice", 20, "A"), ("Bob", 22, "B+"), ("Charlie", 19, "C")]
        .into_iter()
        .map(|(name, age, grade)| Student {
            id: None,
            name: name.into(),
            age,
            grade: grade.into(),
            created_at: now,
        })
        .collect()
}

pub fn order_samples(now: DateTime<Utc>) -> Vec<Order> {
    [
        ("Copy Paper", 500, "Michael Scott"),
        ("Cardstock", 100, "Dwight Schrute"),
        ("Recycled Paper", 300, "Jim Halpert"),
    ]
    .into_iter()
    .map(|(paper_type, quantity, salesperson)| Order {
        id: None,
        paper_type: paper_type.into(),
        quantity,
        salesperson: salesperson.into(),
        created_at: now,
        delivery_date: None,
    })
    .collect()
}

/// Posts are spaced a minute apart so the newest-first ordering is well defined.
pub fn post_samples(now: DateTime<Utc>) -> Vec<Post> {
    [
        ("Michael Scott", "Limitless paper in a paperless world."),
        ("Dwight Schrute", "Beets restocked. Cardstock orders ship Monday."),
        ("Jim Halpert", "Recycled paper is now 10% off for the whole branch."),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (author, content))| Post {
        id: None,
        author: author.into(),
        content: content.into(),
        email: None,
        status: None,
        created_at: now - Duration::minutes(2 - i as i64),
    })
    .collect()
}

pub fn seed_students(now: DateTime<Utc>) -> Result<Vec<Document>, serde_json::Error> {
    to_documents(&student_samples(now))
}

pub fn seed_orders(now: DateTime<Utc>) -> Result<Vec<Document>, serde_json::Error> {
    to_documents(&order_samples(now))
}

pub fn seed_posts(now: DateTime<Utc>) -> Result<Vec<Document>, serde_json::Error> {
    to_documents(&post_samples(now))
}
