//! Integration tests for the authentication store state machine.

#![allow(clippy::unwrap_used, clippy::panic)]

use dispatch_console_api::{ApiConfig, ApiError, AuthClient, Credentials, HttpClient};
use dispatch_console_stores::{AuthPhase, AuthStore};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store_for(server: &MockServer) -> AuthStore {
    let http = HttpClient::new(&ApiConfig::new(server.uri())).unwrap();
    AuthStore::new(AuthClient::new(http))
}

async fn mount_csrf(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/auth/csrf/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "csrftoken=tok; Path=/")
                .set_body_json(json!({"detail": "CSRF cookie set"})),
        )
        .mount(server)
        .await;
}

fn user_body() -> serde_json::Value {
    json!({
        "id": 1,
        "username": "dispatcher",
        "email": "dispatcher@example.com",
        "first_name": "Dee",
        "last_name": "Spatcher",
        "is_staff": true,
        "is_superuser": false
    })
}

#[tokio::test]
async fn test_login_success_reaches_authenticated() {
    let server = MockServer::start().await;
    mount_csrf(&server).await;
    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": user_body(),
            "message": "Login successful"
        })))
        .mount(&server)
        .await;

    let store = store_for(&server);
    assert_eq!(store.phase().await, AuthPhase::Unknown);

    let response = store
        .login(&Credentials::new("dispatcher", "secret"))
        .await
        .unwrap();

    assert_eq!(response.message.as_deref(), Some("Login successful"));
    assert_eq!(store.phase().await, AuthPhase::Authenticated);
    let session = store.session().await;
    assert!(session.authenticated);
    assert!(session.is_admin());
    assert_eq!(session.user.unwrap().username, "dispatcher");
    assert!(store.error().await.is_none());
    assert!(!store.is_loading().await);
}

#[tokio::test]
async fn test_login_rejection_clears_session_and_reraises() {
    let server = MockServer::start().await;
    mount_csrf(&server).await;
    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let store = store_for(&server);
    let error = store
        .login(&Credentials::new("x", "bad"))
        .await
        .unwrap_err();

    match error {
        ApiError::Unauthorized { message, .. } => assert_eq!(message, "Invalid credentials"),
        other => panic!("expected Unauthorized, got {other:?}"),
    }
    assert_eq!(store.phase().await, AuthPhase::Unauthenticated);
    let session = store.session().await;
    assert!(!session.authenticated);
    assert!(session.user.is_none());
    assert!(store.has_error().await);

    store.clear_error().await;
    assert!(!store.has_error().await);
}

#[tokio::test]
async fn test_login_records_setup_error_when_priming_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/csrf/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let error = store
        .login(&Credentials::new("dispatcher", "secret"))
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::ClientSetup(_)));
    assert_eq!(store.phase().await, AuthPhase::Unauthenticated);
}

#[tokio::test]
async fn test_logout_success_clears_session() {
    let server = MockServer::start().await;
    mount_csrf(&server).await;
    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": user_body()})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/logout/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Logout successful"})),
        )
        .mount(&server)
        .await;

    let store = store_for(&server);
    store
        .login(&Credentials::new("dispatcher", "secret"))
        .await
        .unwrap();
    store.logout().await.unwrap();

    assert_eq!(store.phase().await, AuthPhase::Unauthenticated);
    assert!(store.session().await.user.is_none());
}

#[tokio::test]
async fn test_logout_failure_keeps_stale_session_and_reraises() {
    let server = MockServer::start().await;
    mount_csrf(&server).await;
    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": user_body()})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/logout/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("session backend down"))
        .mount(&server)
        .await;

    let store = store_for(&server);
    store
        .login(&Credentials::new("dispatcher", "secret"))
        .await
        .unwrap();

    let error = store.logout().await.unwrap_err();
    assert!(matches!(error, ApiError::Server { .. }));

    // The local session is only cleared on success.
    assert_eq!(store.phase().await, AuthPhase::Authenticated);
    assert!(store.session().await.authenticated);
    assert!(store.error().await.is_some());
}

#[tokio::test]
async fn test_check_auth_reconciles_both_ways() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/check/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "authenticated": true,
            "user": user_body()
        })))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let session = store.check_auth().await;
    assert!(session.authenticated);
    assert_eq!(store.phase().await, AuthPhase::Authenticated);

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/auth/check/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "authenticated": false,
            "user": null
        })))
        .mount(&server)
        .await;

    let session = store.check_auth().await;
    assert!(!session.authenticated);
    assert!(session.user.is_none());
    assert_eq!(store.phase().await, AuthPhase::Unauthenticated);
}

#[tokio::test]
async fn test_check_auth_absorbs_network_failure() {
    let http = HttpClient::new(
        &ApiConfig::new("http://127.0.0.1:9").with_timeout(Duration::from_millis(500)),
    )
    .unwrap();
    let store = AuthStore::new(AuthClient::new(http));

    // Never raises; the failure collapses into the unauthenticated state.
    let session = store.check_auth().await;
    assert!(!session.authenticated);
    assert!(session.user.is_none());
    assert_eq!(store.phase().await, AuthPhase::Unauthenticated);
    assert!(store.error().await.is_some_and(|e| e.is_network()));
}

#[tokio::test]
async fn test_current_user_failure_clears_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/user/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Authentication credentials were not provided."})),
        )
        .mount(&server)
        .await;

    let store = store_for(&server);
    assert!(store.current_user().await.is_none());
    assert_eq!(store.phase().await, AuthPhase::Unauthenticated);
    assert!(store.session().await.user.is_none());
}

#[tokio::test]
async fn test_current_user_success_populates_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/user/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let user = store.current_user().await.unwrap();
    assert_eq!(user.username, "dispatcher");
    assert!(store.session().await.authenticated);
    assert_eq!(store.phase().await, AuthPhase::Authenticated);
}
