use crate::support::spawn;
use reqwest::Method;
use serde_json::{json, Value};

#[tokio::test]
async fn malformed_json_gets_the_error_envelope() {
    let (app, store) = spawn().await;
    for path in ["/api/students", "/api/contact"] {
        let resp = app
            .send_raw(Method::POST, path, Some("application/json"), "{not json")
            .await;
        assert_eq!(resp.status().as_u16(), 400, "{}", path);
        let body: Value = resp.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("JSON"), "{}", path);
    }
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn missing_content_type_gets_the_error_envelope() {
    let (app, store) = spawn().await;
    let resp = app
        .send_raw(Method::POST, "/api/orders", None, r#"{"paperType":"A4","quantity":1,"salesperson":"Oscar"}"#)
        .await;
    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn non_object_body_is_rejected() {
    let (app, _store) = spawn().await;
    let (status, body) = app.post_json("/api/posts", json!(["author", "content"])).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "body must be a JSON object");
}

#[tokio::test]
async fn update_with_malformed_json_is_rejected() {
    let (app, _store) = spawn().await;
    let (_, created) = app
        .post_json("/api/students", json!({ "name": "Holly", "age": 35, "grade": "A" }))
        .await;
    let path = format!("/api/students/{}", created["_id"].as_str().unwrap());
    let resp = app
        .send_raw(Method::PATCH, &path, Some("application/json"), "{\"grade\":")
        .await;
    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());

    let (_, after) = app.get_json(&path).await;
    assert_eq!(after["grade"], "A");
}

#[tokio::test]
async fn form_endpoint_redirects_when_body_is_not_urlencoded() {
    let (app, store) = spawn().await;
    let resp = app
        .send_raw(
            Method::POST,
            "/api/students/form",
            Some("application/json"),
            r#"{"name":"Gina","age":19,"grade":"A"}"#,
        )
        .await;
    assert_eq!(resp.status().as_u16(), 303);
    let location = resp
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/traditional-forms.html?error=invalid-fields");
    assert_eq!(store.calls(), 0);
}
