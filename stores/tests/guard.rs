//! Integration tests for the navigation guard.

#![allow(clippy::unwrap_used)]

use dispatch_console_api::{ApiConfig, AuthClient, Credentials, HttpClient};
use dispatch_console_stores::{AuthStore, LOGIN, NavigationGuard, RIDES, RouteDecision};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn stores_for(server: &MockServer) -> (AuthStore, NavigationGuard) {
    let http = HttpClient::new(&ApiConfig::new(server.uri())).unwrap();
    let auth = AuthStore::new(AuthClient::new(http));
    let guard = NavigationGuard::new(auth.clone());
    (auth, guard)
}

fn user_body() -> serde_json::Value {
    json!({"id": 1, "username": "dispatcher", "is_staff": true})
}

#[tokio::test]
async fn test_unauthenticated_protected_navigation_redirects_to_login() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/check/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "authenticated": false,
            "user": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_auth, guard) = stores_for(&server);
    assert_eq!(guard.before_each(&RIDES).await, RouteDecision::Redirect(LOGIN));
}

#[tokio::test]
async fn test_guard_tolerates_failed_check() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/check/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("down"))
        .mount(&server)
        .await;

    let (_auth, guard) = stores_for(&server);
    // check_auth never raises; a failed probe reads as unauthenticated.
    assert_eq!(guard.before_each(&RIDES).await, RouteDecision::Redirect(LOGIN));
}

#[tokio::test]
async fn test_cached_identity_skips_the_probe() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/csrf/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "csrftoken=tok; Path=/")
                .set_body_json(json!({"detail": "CSRF cookie set"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": user_body()})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/check/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "authenticated": true,
            "user": user_body()
        })))
        .expect(0)
        .mount(&server)
        .await;

    let (auth, guard) = stores_for(&server);
    auth.login(&Credentials::new("dispatcher", "secret"))
        .await
        .unwrap();

    assert_eq!(guard.before_each(&RIDES).await, RouteDecision::Proceed);
}

#[tokio::test]
async fn test_authenticated_login_navigation_redirects_to_rides() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/csrf/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "csrftoken=tok; Path=/")
                .set_body_json(json!({"detail": "CSRF cookie set"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": user_body()})))
        .mount(&server)
        .await;

    let (auth, guard) = stores_for(&server);
    auth.login(&Credentials::new("dispatcher", "secret"))
        .await
        .unwrap();

    assert_eq!(guard.before_each(&LOGIN).await, RouteDecision::Redirect(RIDES));
}

#[tokio::test]
async fn test_unauthenticated_login_navigation_proceeds() {
    let server = MockServer::start().await;
    // The login route does not require auth, so no probe is made at all.
    Mock::given(method("GET"))
        .and(path("/auth/check/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "authenticated": false,
            "user": null
        })))
        .expect(0)
        .mount(&server)
        .await;

    let (_auth, guard) = stores_for(&server);
    assert_eq!(guard.before_each(&LOGIN).await, RouteDecision::Proceed);
}
