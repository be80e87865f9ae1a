use crate::support::spawn;
use infinity_api::model::ContactMessage;
use infinity_api::DocumentStore;
use serde_json::json;

#[tokio::test]
async fn bad_email_is_rejected_before_the_store() {
    let (app, store) = spawn().await;
    let (status, body) = app
        .post_json(
            "/api/contact",
            json!({ "name": "Toby", "email": "toby-at-hr", "message": "Please read the handbook" }),
        )
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Invalid email format");
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn missing_contact_fields_are_listed() {
    let (app, _store) = spawn().await;
    let (status, body) = app
        .post_json("/api/contact", json!({ "name": "Toby" }))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Missing required fields: email, message");
}

#[tokio::test]
async fn message_is_stored_apart_from_posts() {
    let (app, store) = spawn().await;
    let (status, body) = app
        .post_json(
            "/api/contact",
            json!({ "name": "Kelly", "email": "kelly@dundermifflin.com", "message": "Call me!" }),
        )
        .await;
    assert_eq!(status, 201);
    assert_eq!(body["message"], "Message received! Kelly will get back to you soon.");
    let id = body["_id"].as_str().unwrap();

    let stored = store.find_one_by_id("contact_messages", id).await.unwrap().unwrap();
    let stored: ContactMessage = serde_json::from_value(stored.into()).unwrap();
    assert_eq!(stored.id.as_deref(), Some(id));
    assert_eq!(stored.email, "kelly@dundermifflin.com");
    assert_eq!(stored.status, "pending");

    let (_, posts) = app.get_json("/api/posts").await;
    assert_eq!(posts, json!([]));
}

#[tokio::test]
async fn contact_has_no_crud_routes() {
    let (app, _store) = spawn().await;
    let (status, body) = app.get_json("/api/contact/seed").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Not found");
}
