//! Integration tests for the OAuth login flow and session tokens.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_root_welcome_message() {
    let app = TestApp::new();
    let response = app.request("GET", "/", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.str_field("message"),
        "Welcome to the NoteHub OAuth2 app!"
    );
}

#[tokio::test]
async fn test_health_reports_store() {
    let app = TestApp::new();
    let response = app.request("GET", "/users/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.str_field("status"), "ok");
    assert_eq!(response.str_field("storage"), "ok");
}

#[tokio::test]
async fn test_login_url_for_mock_provider() {
    let app = TestApp::new();
    let response = app.request("GET", "/users/login/test", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let url = response.str_field("authorization_url");
    let state = response.str_field("state");
    assert!(url.starts_with("http://example.com/auth?provider=test&state="));
    assert!(url.ends_with(state));
    assert_eq!(state.len(), 43);
}

#[tokio::test]
async fn test_login_state_is_fresh_per_request() {
    let app = TestApp::new();
    let first = app.request("GET", "/users/login/test", None, None).await;
    let second = app.request("GET", "/users/login/test", None, None).await;

    assert_ne!(first.str_field("state"), second.str_field("state"));
}

#[tokio::test]
async fn test_login_unsupported_provider() {
    let app = TestApp::new();
    let response = app.request("GET", "/users/login/github", None, None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.str_field("error"), "UNSUPPORTED_PROVIDER");
}

#[tokio::test]
async fn test_callback_issues_tokens_and_creates_user() {
    let app = TestApp::new();
    let body = app.login().await;

    assert_eq!(body["token_type"], "bearer");
    assert!(body["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(body["refresh_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(app.store.user_count().await, 1);
}

#[tokio::test]
async fn test_callback_code_is_single_use() {
    let app = TestApp::new();
    app.login().await;

    let replay = app
        .request("GET", "/users/auth/test/callback?code=test-code", None, None)
        .await;
    assert_eq!(replay.status, StatusCode::BAD_REQUEST);
    assert_eq!(replay.str_field("error"), "EXCHANGE_FAILED");
    assert_eq!(app.store.user_count().await, 1);
}

#[tokio::test]
async fn test_callback_wrong_code_does_not_consume_provider() {
    let app = TestApp::new();
    let wrong = app
        .request("GET", "/users/auth/test/callback?code=bogus", None, None)
        .await;
    assert_eq!(wrong.status, StatusCode::BAD_REQUEST);

    app.login().await;
}

#[tokio::test]
async fn test_callback_unsupported_provider() {
    let app = TestApp::new();
    let response = app
        .request("GET", "/users/auth/github/callback?code=abc", None, None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.user_count().await, 0);
}

#[tokio::test]
async fn test_callback_requires_code() {
    let app = TestApp::new();
    let response = app
        .request("GET", "/users/auth/test/callback", None, None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.str_field("error"), "VALIDATION");
    assert_eq!(app.store.user_count().await, 0);
}

#[tokio::test]
async fn test_refresh_with_empty_body_is_bad_request() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/users/auth/refresh",
            Some(serde_json::json!({})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.str_field("error"), "VALIDATION");
    assert!(response.str_field("message").contains("refresh_token"));
}

#[tokio::test]
async fn test_me_requires_bearer_token() {
    let app = TestApp::new();

    let missing = app.request("GET", "/users/me", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.headers["www-authenticate"], "Bearer");

    let garbage = app
        .request("GET", "/users/me", None, Some("not-a-token"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        garbage.str_field("message"),
        "Could not validate credentials"
    );
}

#[tokio::test]
async fn test_refresh_token_cannot_authenticate_requests() {
    let app = TestApp::new();
    let body = app.login().await;
    let refresh = body["refresh_token"].as_str().expect("refresh token");

    let response = app.request("GET", "/users/me", None, Some(refresh)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_issues_working_pair() {
    let app = TestApp::new();
    let body = app.login().await;

    let response = app
        .request(
            "POST",
            "/users/auth/refresh",
            Some(serde_json::json!({ "refresh_token": body["refresh_token"] })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.str_field("token_type"), "bearer");

    let access = response.str_field("access_token");
    let me = app.request("GET", "/users/me", None, Some(access)).await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = TestApp::new();
    let body = app.login().await;

    let response = app
        .request(
            "POST",
            "/users/auth/refresh",
            Some(serde_json::json!({ "refresh_token": body["access_token"] })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_tokens_are_valid_across_app_instances() {
    let first = TestApp::new();
    let second = TestApp::sharing_store(&first);
    let token = first.access_token().await;

    let response = second.request("GET", "/users/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
}
