mod common;

use axum::http::StatusCode;
use common::TestApp;
use schooldesk_core::Role;
use serde_json::{Value, json};

fn login_body(username: &str, password: &str, role: &str) -> Value {
    json!({ "username": username, "password": password, "role": role })
}

#[tokio::test]
async fn test_login_success_sets_session_cookie() {
    let app = TestApp::new();
    let user = app.users.add_user("mrsmith", "testpass123", Role::Teacher);

    let response = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(login_body("mrsmith", "testpass123", "teacher")),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["redirect"], "/teacher");

    let cookie = response.set_cookie().expect("session cookie");
    assert!(cookie.starts_with("auth-token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=3600"));
    assert!(!cookie.contains("Secure"));

    let token = cookie
        .trim_start_matches("auth-token=")
        .split(';')
        .next()
        .unwrap();
    let session = app.state.tokens().verify(token).expect("issued token verifies");
    assert_eq!(session.sub, user.id.to_string());
    assert_eq!(session.role, Role::Teacher);
    assert_eq!(session.username, "mrsmith");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new();
    app.users.add_user("mrsmith", "testpass123", Role::Teacher);

    let response = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(login_body("mrsmith", "wrongpass", "teacher")),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "Invalid credentials");
    assert!(response.set_cookie().is_none());
}

#[tokio::test]
async fn test_login_role_must_match_account() {
    let app = TestApp::new();
    app.users.add_user("mrsmith", "testpass123", Role::Teacher);

    let response = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(login_body("mrsmith", "testpass123", "admin")),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.set_cookie().is_none());
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = TestApp::new();

    let response = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(login_body("nobody", "whatever1", "student")),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_missing_field() {
    let app = TestApp::new();

    let response = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": "mrsmith", "role": "teacher" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "password is required");
}

#[tokio::test]
async fn test_login_empty_username() {
    let app = TestApp::new();

    let response = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(login_body("", "testpass123", "teacher")),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "username is required");
}

#[tokio::test]
async fn test_login_unknown_role() {
    let app = TestApp::new();

    let response = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(login_body("mrsmith", "testpass123", "janitor")),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logout_expires_cookie() {
    let app = TestApp::new();
    let token = app.token_for(Role::Student, "s1");

    let response = app.send("POST", "/api/auth/logout", Some(&token), None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    let cookie = response.set_cookie().expect("removal cookie");
    assert!(cookie.starts_with("auth-token=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_session_returns_verified_session() {
    let app = TestApp::new();
    let token = app.token_for(Role::Parent, "p1");

    let response = app.get("/api/auth/session", Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["sub"], "p1");
    assert_eq!(response.body["role"], "parent");
}

#[tokio::test]
async fn test_session_null_without_cookie() {
    let app = TestApp::new();

    let response = app.get("/api/auth/session", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.is_null());
}

#[tokio::test]
async fn test_session_null_for_tampered_token() {
    let app = TestApp::new();
    let mut token = app.token_for(Role::Admin, "a1");
    token.push('x');

    let response = app.get("/api/auth/session", Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.is_null());
}

#[tokio::test]
async fn test_session_null_for_prefixed_token() {
    let app = TestApp::new();
    let token = format!("Bearer{}", app.token_for(Role::Admin, "a1"));

    let response = app.get("/api/auth/session", Some(&token)).await;

    assert!(response.body.is_null());
}
