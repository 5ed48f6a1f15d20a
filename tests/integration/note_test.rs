//! Integration tests for note management.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_note_lifecycle() {
    let app = TestApp::new();
    let token = app.access_token().await;

    let created = app
        .request(
            "POST",
            "/users/me/notes",
            Some(serde_json::json!({ "content": "Buy milk and bread today" })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.str_field("content"), "Buy milk and bread today");
    let note_id = created.str_field("id").to_string();

    let listed = app
        .request("GET", "/users/me/notes", None, Some(&token))
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    let notes = listed.body.as_array().expect("note list");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["id"], note_id.as_str());
    assert_eq!(notes[0]["content"], "Buy milk and bread today");

    let me = app.request("GET", "/users/me", None, Some(&token)).await;
    assert_eq!(me.body["notes"].as_array().map(Vec::len), Some(1));

    let deleted = app
        .request(
            "DELETE",
            &format!("/users/me/notes/{note_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.str_field("message"), "Note deleted successfully");

    let listed = app
        .request("GET", "/users/me/notes", None, Some(&token))
        .await;
    assert_eq!(listed.body, serde_json::json!([]));
}

#[tokio::test]
async fn test_create_note_validates_content() {
    let app = TestApp::new();
    let token = app.access_token().await;

    let short = app
        .request(
            "POST",
            "/users/me/notes",
            Some(serde_json::json!({ "content": "too short" })),
            Some(&token),
        )
        .await;
    assert_eq!(short.status, StatusCode::BAD_REQUEST);
    assert_eq!(short.str_field("error"), "VALIDATION");

    let long = app
        .request(
            "POST",
            "/users/me/notes",
            Some(serde_json::json!({ "content": "n".repeat(501) })),
            Some(&token),
        )
        .await;
    assert_eq!(long.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.note_count().await, 0);
}

#[tokio::test]
async fn test_create_note_without_content_field() {
    let app = TestApp::new();
    let token = app.access_token().await;

    let response = app
        .request(
            "POST",
            "/users/me/notes",
            Some(serde_json::json!({ "text": "hello world here" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.str_field("error"), "VALIDATION");
    assert!(response.str_field("message").contains("content"));
    assert_eq!(app.store.note_count().await, 0);
}

#[tokio::test]
async fn test_delete_missing_note() {
    let app = TestApp::new();
    let token = app.access_token().await;

    let response = app
        .request(
            "DELETE",
            &format!("/users/me/notes/{}", uuid::Uuid::new_v4()),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_note_with_malformed_id() {
    let app = TestApp::new();
    let token = app.access_token().await;

    let response = app
        .request("DELETE", "/users/me/notes/42", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cannot_delete_another_users_note() {
    let owner = TestApp::new();
    let intruder = TestApp::sharing_store(&owner);
    let owner_token = owner.access_token().await;
    let intruder_token = intruder.access_token().await;

    let created = owner
        .request(
            "POST",
            "/users/me/notes",
            Some(serde_json::json!({ "content": "private thoughts here" })),
            Some(&owner_token),
        )
        .await;
    let note_id = created.str_field("id").to_string();

    let response = intruder
        .request(
            "DELETE",
            &format!("/users/me/notes/{note_id}"),
            None,
            Some(&intruder_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let intruder_notes = intruder
        .request("GET", "/users/me/notes", None, Some(&intruder_token))
        .await;
    assert_eq!(intruder_notes.body, serde_json::json!([]));
    assert_eq!(owner.store.note_count().await, 1);
}
