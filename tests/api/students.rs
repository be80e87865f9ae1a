use crate::support::{spawn, UNKNOWN_ID};
use infinity_api::model::{timestamp, Student};
use reqwest::Method;
use serde_json::json;
use std::collections::HashSet;

#[tokio::test]
async fn student_lifecycle() {
    let (app, _store) = spawn().await;

    let (status, created) = app
        .post_json("/api/students", json!({ "name": "Alice", "age": "20", "grade": "A" }))
        .await;
    assert_eq!(status, 201);
    assert_eq!(created["age"], 20);
    let id = created["_id"].as_str().unwrap().to_string();

    let (status, fetched) = app.get_json(&format!("/api/students/{}", id)).await;
    assert_eq!(status, 200);
    assert_eq!(fetched, created);

    let (status, body) = app
        .send_json(Method::PATCH, &format!("/api/students/{}", id), json!({ "grade": "A+" }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Student updated");

    let (_, after) = app.get_json(&format!("/api/students/{}", id)).await;
    let student: Student = serde_json::from_value(after).unwrap();
    assert_eq!(student.name, "Alice");
    assert_eq!(student.age, 20);
    assert_eq!(student.grade, "A+");
    assert_eq!(created["createdAt"], timestamp::format(&student.created_at));

    let (status, body) = app.delete(&format!("/api/students/{}", id)).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Student deleted");

    let (status, body) = app.get_json(&format!("/api/students/{}", id)).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Student not found");
}

#[tokio::test]
async fn create_with_missing_fields_never_reaches_the_store() {
    let (app, store) = spawn().await;

    for payload in [
        json!({ "age": 20, "grade": "A" }),
        json!({ "name": "", "age": 20, "grade": "A" }),
        json!({ "name": "Bob", "age": null, "grade": "A" }),
        json!({}),
    ] {
        let (status, body) = app.post_json("/api/students", payload).await;
        assert_eq!(status, 400);
        assert!(body["error"].as_str().unwrap().starts_with("Missing required fields"));
    }
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn non_numeric_age_is_rejected() {
    let (app, store) = spawn().await;
    let (status, body) = app
        .post_json("/api/students", json!({ "name": "Bob", "age": "old", "grade": "B" }))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "age must be an integer");
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn update_of_unknown_id_is_not_found_whatever_the_payload() {
    let (app, _store) = spawn().await;
    let path = format!("/api/students/{}", UNKNOWN_ID);

    for (method, payload) in [
        (Method::PATCH, json!({ "grade": "B" })),
        (Method::PATCH, json!({ "age": "not a number" })),
        (Method::PATCH, json!({})),
        (Method::PUT, json!({ "name": "Only a name" })),
        (Method::PUT, json!({ "name": "Full", "age": 30, "grade": "C" })),
    ] {
        let (status, body) = app.send_json(method, &path, payload).await;
        assert_eq!(status, 404);
        assert_eq!(body["error"], "Student not found");
    }

    let (status, _) = app
        .send_json(Method::PATCH, "/api/students/not-an-object-id", json!({ "grade": "B" }))
        .await;
    assert_eq!(status, 404);
    let (status, _) = app.delete("/api/students/not-an-object-id").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn full_replace_requires_every_field_and_keeps_created_at() {
    let (app, _store) = spawn().await;
    let (_, created) = app
        .post_json("/api/students", json!({ "name": "Carol", "age": 21, "grade": "B" }))
        .await;
    let path = format!("/api/students/{}", created["_id"].as_str().unwrap());

    let (status, body) = app.send_json(Method::PUT, &path, json!({ "name": "Carol" })).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Missing required fields: age, grade");

    let (status, _) = app
        .send_json(
            Method::PUT,
            &path,
            json!({ "name": "Caroline", "age": "22", "grade": "A", "createdAt": "1999-01-01" }),
        )
        .await;
    assert_eq!(status, 200);

    let (_, after) = app.get_json(&path).await;
    assert_eq!(after["name"], "Caroline");
    assert_eq!(after["age"], 22);
    assert_eq!(after["createdAt"], created["createdAt"]);
    assert_eq!(after["_id"], created["_id"]);
}

#[tokio::test]
async fn partial_update_leaves_other_fields_alone() {
    let (app, _store) = spawn().await;
    let (_, created) = app
        .post_json("/api/students", json!({ "name": "Dan", "age": 30, "grade": "C" }))
        .await;
    let path = format!("/api/students/{}", created["_id"].as_str().unwrap());

    let (status, _) = app.send_json(Method::PATCH, &path, json!({ "age": "31" })).await;
    assert_eq!(status, 200);

    let (_, after) = app.get_json(&path).await;
    assert_eq!(after["name"], "Dan");
    assert_eq!(after["age"], 31);
    assert_eq!(after["grade"], "C");
}

#[tokio::test]
async fn cleanup_always_leaves_the_collection_empty() {
    let (app, _store) = spawn().await;

    let (status, body) = app.delete("/api/students/cleanup").await;
    assert_eq!(status, 200);
    assert_eq!(body["deletedCount"], 0);

    for name in ["Eve", "Frank"] {
        app.post_json("/api/students", json!({ "name": name, "age": 18, "grade": "B" }))
            .await;
    }
    let (status, body) = app.delete("/api/students/cleanup").await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "All students deleted");
    assert_eq!(body["deletedCount"], 2);

    let (status, list) = app.get_json("/api/students").await;
    assert_eq!(status, 200);
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn seed_replaces_existing_students_with_the_sample() {
    let (app, _store) = spawn().await;
    app.post_json("/api/students", json!({ "name": "Zed", "age": 40, "grade": "F" }))
        .await;

    let (status, body) = app.post_json("/api/students/seed", json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Students seeded");
    assert_eq!(body["insertedCount"], 3);

    let (_, list) = app.get_json("/api/students").await;
    let students: Vec<Student> = serde_json::from_value(list).unwrap();
    let names: HashSet<&str> = students.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, HashSet::from(["Alice", "Bob", "Charlie"]));
    assert!(students.iter().all(|s| s.id.is_some()));
}

#[tokio::test]
async fn form_submission_redirects_with_outcome() {
    let (app, store) = spawn().await;

    let (status, location) = app
        .post_form("/api/students/form", &[("name", "Gina"), ("age", "19"), ("grade", "A")])
        .await;
    assert_eq!(status, 303);
    assert_eq!(location, "/traditional-forms.html?success=student-added");

    let calls = store.calls();
    let (status, location) = app
        .post_form("/api/students/form", &[("name", "Gina"), ("age", "")])
        .await;
    assert_eq!(status, 303);
    assert_eq!(location, "/traditional-forms.html?error=missing-fields");
    assert_eq!(store.calls(), calls);

    let (_, location) = app
        .post_form("/api/students/form", &[("name", "Gina"), ("age", "nineteen"), ("grade", "A")])
        .await;
    assert_eq!(location, "/traditional-forms.html?error=invalid-fields");

    let (_, list) = app.get_json("/api/students").await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["age"], 19);
}
