//! Integration tests for the current-user endpoints.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_me_returns_profile_with_notes() {
    let app = TestApp::new();
    let token = app.access_token().await;

    let response = app.request("GET", "/users/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let email = response.str_field("email");
    assert!(email.starts_with("testuser"));
    assert!(email.ends_with("@example.com"));
    assert!(response.str_field("name").starts_with("Test User "));
    assert!(response.body["id"].is_string());
    assert_eq!(response.body["notes"], serde_json::json!([]));
}

#[tokio::test]
async fn test_rename_updates_name() {
    let app = TestApp::new();
    let token = app.access_token().await;

    let response = app
        .request("PUT", "/users/me/name?new_name=Alice%20Smith", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.str_field("name"), "Alice Smith");

    let me = app.request("GET", "/users/me", None, Some(&token)).await;
    assert_eq!(me.str_field("name"), "Alice Smith");
}

#[tokio::test]
async fn test_rename_enforces_length() {
    let app = TestApp::new();
    let token = app.access_token().await;

    let short = app
        .request("PUT", "/users/me/name?new_name=Bob", None, Some(&token))
        .await;
    assert_eq!(short.status, StatusCode::BAD_REQUEST);
    assert_eq!(short.str_field("error"), "VALIDATION");

    let long_name = "x".repeat(101);
    let long = app
        .request(
            "PUT",
            &format!("/users/me/name?new_name={long_name}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(long.status, StatusCode::BAD_REQUEST);

    let boundary = app
        .request("PUT", "/users/me/name?new_name=Alice", None, Some(&token))
        .await;
    assert_eq!(boundary.status, StatusCode::OK);
}

#[tokio::test]
async fn test_rename_without_query_is_bad_request() {
    let app = TestApp::new();
    let token = app.access_token().await;

    let response = app
        .request("PUT", "/users/me/name", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.str_field("error"), "VALIDATION");
}

#[tokio::test]
async fn test_rename_requires_authentication() {
    let app = TestApp::new();
    let response = app
        .request("PUT", "/users/me/name?new_name=Alice%20Smith", None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_account_invalidates_token() {
    let app = TestApp::new();
    let token = app.access_token().await;

    let create = app
        .request(
            "POST",
            "/users/me/notes",
            Some(serde_json::json!({ "content": "a note that will be removed" })),
            Some(&token),
        )
        .await;
    assert_eq!(create.status, StatusCode::OK);

    let response = app.request("DELETE", "/users/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.str_field("message"),
        "User account deleted successfully"
    );
    assert_eq!(app.store.user_count().await, 0);
    assert_eq!(app.store.note_count().await, 0);

    let after = app.request("GET", "/users/me", None, Some(&token)).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}
