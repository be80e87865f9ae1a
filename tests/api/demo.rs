use crate::support::{serve, spawn};
use infinity_api::{AppState, MemoryStore, ResourceRegistry};
use reqwest::Method;
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[tokio::test]
async fn spencer_message() {
    let (app, _store) = spawn().await;
    let (status, body) = app.get_json("/api/spencer").await;
    assert_eq!(status, 200);
    assert_eq!(body["myVar"], "This is a message from the API for Spencer.");
}

#[tokio::test]
async fn echo_endpoints() {
    let (app, _store) = spawn().await;

    let (_, body) = app.get_json("/api/query?a=1&b=two").await;
    assert_eq!(body, json!({ "a": "1", "b": "two" }));

    let (_, body) = app.get_json("/api/query").await;
    assert_eq!(body, json!({}));

    let (_, body) = app.get_json("/api/url/hello").await;
    assert_eq!(body, json!({ "param": "hello" }));

    let (status, body) = app.post_json("/api/body", json!({ "x": [1, 2] })).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "x": [1, 2] }));

    let (_, body) = app.get_json("/api/body").await;
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn health_and_readiness() {
    let (app, _store) = spawn().await;
    let (status, body) = app.get_json("/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
    assert!(body["uptime"].as_f64().unwrap() >= 0.0);

    let (status, body) = app.get_json("/ready").await;
    assert_eq!(status, 200);
    assert_eq!(body["backend"], "memory");

    let (status, body) = app.get_json("/version").await;
    assert_eq!(status, 200);
    assert_eq!(body["name"], "infinity-api");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn uptime_counts_from_process_start() {
    let started_at = Instant::now().checked_sub(Duration::from_secs(120)).unwrap();
    let state = AppState::new(
        Arc::new(MemoryStore::new()),
        ResourceRegistry::builtin().unwrap(),
        started_at,
    );
    let app = serve(state).await;
    let (_, body) = app.get_json("/health").await;
    assert!(body["uptime"].as_f64().unwrap() >= 120.0);
}

#[tokio::test]
async fn pages_and_static_files() {
    let (app, _store) = spawn().await;

    let resp = app.client.get(app.url("/")).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("<html"));

    let resp = app.client.get(app.url("/spencer")).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let resp = app.client.get(app.url("/traditional-forms.html")).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
}

#[tokio::test]
async fn unknown_route_is_json_not_found() {
    let (app, _store) = spawn().await;
    let (status, body) = app.get_json("/api/nothing-here").await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({ "error": "Not found" }));
}

#[tokio::test]
async fn unmatched_method_and_path_is_json_not_found() {
    let (app, store) = spawn().await;
    for (method, path) in [
        (Method::POST, "/api/nothing-here"),
        (Method::DELETE, "/api/nothing-here"),
        (Method::GET, "/api/contact"),
        (Method::DELETE, "/api/students"),
        (Method::PUT, "/health"),
        (Method::POST, "/spencer"),
        (Method::POST, "/traditional-forms.html"),
    ] {
        let resp = app.client.request(method.clone(), app.url(path)).send().await.unwrap();
        assert_eq!(resp.status().as_u16(), 404, "{} {}", method, path);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body, json!({ "error": "Not found" }), "{} {}", method, path);
    }
    assert_eq!(store.calls(), 0);
}
