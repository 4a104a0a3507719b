mod common;

use axum::http::StatusCode;
use common::TestApp;
use schooldesk_core::Role;

fn assert_redirect(response: &common::TestResponse, to: &str) {
    assert!(
        response.status.is_redirection(),
        "expected redirect, got {}",
        response.status
    );
    assert_eq!(response.location(), Some(to));
}

fn assert_cookie_cleared(response: &common::TestResponse) {
    let cookie = response.set_cookie().expect("removal cookie");
    assert!(cookie.starts_with("auth-token=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_protected_page_without_cookie_redirects_to_sign_in() {
    let app = TestApp::new();

    let response = app.get("/admin", None).await;

    assert_redirect(&response, "/sign-in");
    assert!(response.set_cookie().is_none());
}

#[tokio::test]
async fn test_sign_in_page_without_cookie_is_allowed() {
    let app = TestApp::new();

    let response = app.get("/sign-in", None).await;

    // Allowed through the gate; pages themselves are not served here.
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body["error"].is_string());
}

#[tokio::test]
async fn test_signed_in_user_is_sent_home_from_sign_in_and_root() {
    let app = TestApp::new();
    let token = app.token_for(Role::Teacher, "t1");

    assert_redirect(&app.get("/sign-in", Some(&token)).await, "/teacher");
    assert_redirect(&app.get("/", Some(&token)).await, "/teacher");
}

#[tokio::test]
async fn test_role_is_sent_home_from_foreign_section() {
    let app = TestApp::new();
    let token = app.token_for(Role::Teacher, "t1");

    let response = app.get("/admin", Some(&token)).await;

    assert_redirect(&response, "/teacher");
    assert!(response.set_cookie().is_none());
}

#[tokio::test]
async fn test_role_enters_own_section() {
    let app = TestApp::new();
    let token = app.token_for(Role::Teacher, "t1");

    let response = app.get("/teacher/classes", Some(&token)).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_pages_follow_route_table() {
    let app = TestApp::new();
    let student = app.token_for(Role::Student, "s1");
    let parent = app.token_for(Role::Parent, "p1");
    let admin = app.token_for(Role::Admin, "a1");

    assert_redirect(&app.get("/list/teachers", Some(&student)).await, "/student");
    assert_redirect(&app.get("/list/subjects", Some(&parent)).await, "/parent");
    assert_eq!(
        app.get("/list/exams", Some(&parent)).await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.get("/list/subjects", Some(&admin)).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_unmatched_page_is_closed() {
    let app = TestApp::new();
    let token = app.token_for(Role::Admin, "a1");

    let response = app.get("/settings", Some(&token)).await;

    assert_redirect(&response, "/admin");
}

#[tokio::test]
async fn test_invalid_cookie_on_protected_page_clears_and_redirects() {
    let app = TestApp::new();

    let response = app.get("/admin", Some("not-a-token")).await;

    assert_redirect(&response, "/sign-in");
    assert_cookie_cleared(&response);
}

#[tokio::test]
async fn test_invalid_cookie_on_sign_in_redirects_and_clears() {
    let app = TestApp::new();

    let response = app.get("/sign-in", Some("not-a-token")).await;

    assert_redirect(&response, "/sign-in");
    assert_cookie_cleared(&response);
}

#[tokio::test]
async fn test_dotted_page_path_is_not_treated_as_asset() {
    let app = TestApp::new();

    let response = app.get("/list/students/jane.doe", None).await;

    assert_redirect(&response, "/sign-in");
}

#[tokio::test]
async fn test_invalid_cookie_on_root_redirects_to_sign_in() {
    let app = TestApp::new();

    let response = app.get("/", Some("not-a-token")).await;

    assert_redirect(&response, "/sign-in");
    assert_cookie_cleared(&response);
}

#[tokio::test]
async fn test_prefixed_token_is_rejected() {
    let app = TestApp::new();
    let token = format!("Bearer{}", app.token_for(Role::Admin, "a1"));

    let response = app.get("/admin", Some(&token)).await;

    assert_redirect(&response, "/sign-in");
    assert_cookie_cleared(&response);
}

#[tokio::test]
async fn test_api_and_assets_bypass_gate() {
    let app = TestApp::new();

    let api = app.get("/api/unknown", None).await;
    assert_eq!(api.status, StatusCode::NOT_FOUND);
    assert!(api.location().is_none());

    let asset = app.get("/logo.png", None).await;
    assert_eq!(asset.status, StatusCode::NOT_FOUND);
    assert!(asset.location().is_none());

    let favicon = app.get("/favicon.ico", None).await;
    assert!(favicon.location().is_none());
}

#[tokio::test]
async fn test_health_is_outside_gate() {
    let app = TestApp::new();

    let response = app.get("/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}
