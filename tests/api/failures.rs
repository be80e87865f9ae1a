use crate::support::{spawn_with, FailingStore, UNKNOWN_ID};
use reqwest::Method;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn store_faults_surface_as_opaque_500() {
    let app = spawn_with(Arc::new(FailingStore)).await;

    let (status, body) = app.get_json("/api/students").await;
    assert_eq!(status, 500);
    assert_eq!(body["error"], "Database operation failed");

    let (status, _) = app
        .post_json("/api/orders", json!({ "paperType": "A4", "quantity": 1, "salesperson": "Oscar" }))
        .await;
    assert_eq!(status, 500);

    let (status, _) = app
        .send_json(Method::PATCH, &format!("/api/posts/{}", UNKNOWN_ID), json!({ "content": "x" }))
        .await;
    assert_eq!(status, 500);

    let (status, _) = app.delete("/api/posts/cleanup").await;
    assert_eq!(status, 500);
}

#[tokio::test]
async fn validation_still_wins_over_a_failing_store() {
    let app = spawn_with(Arc::new(FailingStore)).await;
    let (status, body) = app.post_json("/api/students", json!({ "name": "Ryan" })).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Missing required fields: age, grade");
}

#[tokio::test]
async fn form_reports_database_error() {
    let app = spawn_with(Arc::new(FailingStore)).await;
    let (status, location) = app
        .post_form("/api/students/form", &[("name", "Ryan"), ("age", "27"), ("grade", "B")])
        .await;
    assert_eq!(status, 303);
    assert_eq!(location, "/traditional-forms.html?error=database-error");
}

#[tokio::test]
async fn readiness_reports_unavailable_store() {
    let app = spawn_with(Arc::new(FailingStore)).await;
    let (status, body) = app.get_json("/ready").await;
    assert_eq!(status, 503);
    assert_eq!(body["store"], "unavailable");

    let (status, _) = app.get_json("/health").await;
    assert_eq!(status, 200);
}
