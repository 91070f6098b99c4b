//! Authentication API integration tests
//!
//! Drives check, login and register through the full router against the
//! in-memory store.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{auth_header, spawn_app, FOUNDER, FOUNDER_PASSWORD, SECRET};
use twirl::backend::auth::{SecretStore, TokenKeys};

const CHECK: &str = "/api/v1/auth/check";
const LOGIN: &str = "/api/v1/auth/login";
const REGISTER: &str = "/api/v1/auth/register";

#[tokio::test]
async fn test_founder_login_and_check() {
    let app = spawn_app().await;
    let token = app.login(FOUNDER, FOUNDER_PASSWORD).await;

    let (status, body) = app.post(CHECK, Some(&auth_header(&token)), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], FOUNDER);
    let lifetime = body["exp"].as_i64().unwrap() - body["iat"].as_i64().unwrap();
    assert_eq!(lifetime, 300);
}

#[tokio::test]
async fn test_register_then_login() {
    let app = spawn_app().await;
    let sponsor = app.login(FOUNDER, FOUNDER_PASSWORD).await;

    let (status, body) = app
        .post(
            REGISTER,
            Some(&auth_header(&sponsor)),
            Some(json!({ "username": "bob", "password": "Correct-Horse-42" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    let token = app.login("bob", "Correct-Horse-42").await;
    let (status, body) = app.post(CHECK, Some(&auth_header(&token)), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "bob");
}

#[tokio::test]
async fn test_register_trims_credentials() {
    let app = spawn_app().await;
    let sponsor = app.login(FOUNDER, FOUNDER_PASSWORD).await;

    let (status, _) = app
        .post(
            REGISTER,
            Some(&auth_header(&sponsor)),
            Some(json!({ "username": "  carol ", "password": " Correct-Horse-42 " })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    app.login("carol", "Correct-Horse-42").await;
}

#[tokio::test]
async fn test_register_duplicate_conflicts() {
    let app = spawn_app().await;
    let sponsor = app.login(FOUNDER, FOUNDER_PASSWORD).await;
    let body = json!({ "username": "bob", "password": "Correct-Horse-42" });

    let (first, _) = app
        .post(REGISTER, Some(&auth_header(&sponsor)), Some(body.clone()))
        .await;
    assert_eq!(first, StatusCode::OK);

    let (second, err) = app
        .post(REGISTER, Some(&auth_header(&sponsor)), Some(body))
        .await;
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(err["status"], 409);
    assert_eq!(err["msg"], "username is taken");
}

#[tokio::test]
async fn test_register_without_sponsor() {
    let app = spawn_app().await;

    let (status, body) = app
        .post(
            REGISTER,
            None,
            Some(json!({ "username": "mallory", "password": "Correct-Horse-42" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "no token provided");
    assert!(app.auth.store().find_by_username("mallory").await.unwrap().is_none());
}

#[tokio::test]
async fn test_register_with_expired_sponsor() {
    let app = spawn_app().await;
    let expired = TokenKeys::new(SECRET)
        .issue_at(FOUNDER, Utc::now() - Duration::minutes(10))
        .unwrap();

    let (status, body) = app
        .post(
            REGISTER,
            Some(&auth_header(&expired)),
            Some(json!({ "username": "mallory", "password": "Correct-Horse-42" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "invalid token");
    assert!(app.auth.store().find_by_username("mallory").await.unwrap().is_none());
}

#[tokio::test]
async fn test_register_with_forged_sponsor() {
    let app = spawn_app().await;
    let forged = TokenKeys::new(b"some-other-secret").issue(FOUNDER).unwrap();

    let (status, body) = app
        .post(
            REGISTER,
            Some(&auth_header(&forged)),
            Some(json!({ "username": "mallory", "password": "Correct-Horse-42" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "invalid token");
}

#[tokio::test]
async fn test_register_rejects_weak_password() {
    let app = spawn_app().await;
    let sponsor = app.login(FOUNDER, FOUNDER_PASSWORD).await;

    let (status, body) = app
        .post(
            REGISTER,
            Some(&auth_header(&sponsor)),
            Some(json!({ "username": "bob", "password": "aaaaaaaaaaaa" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["msg"]
        .as_str()
        .unwrap()
        .starts_with("password is not complex enough"));
}

#[tokio::test]
async fn test_register_rejects_bad_username() {
    let app = spawn_app().await;
    let sponsor = app.login(FOUNDER, FOUNDER_PASSWORD).await;

    let (status, body) = app
        .post(
            REGISTER,
            Some(&auth_header(&sponsor)),
            Some(json!({ "username": "bob-smith", "password": "Correct-Horse-42" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert_eq!(body["code"], 0);
}

#[tokio::test]
async fn test_register_invalid_body_after_sponsor() {
    let app = spawn_app().await;

    // unauthorized callers get the sponsor error, not the body error
    let (status, body) = app.post(REGISTER, None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "no token provided");

    let sponsor = app.login(FOUNDER, FOUNDER_PASSWORD).await;
    let (status, body) = app.post(REGISTER, Some(&auth_header(&sponsor)), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "invalid body");
}

#[tokio::test]
async fn test_login_failures_look_the_same() {
    let app = spawn_app().await;

    let (wrong_status, wrong) = app
        .post(
            LOGIN,
            None,
            Some(json!({ "username": FOUNDER, "password": "Not-The-Password-1" })),
        )
        .await;
    let (unknown_status, unknown) = app
        .post(
            LOGIN,
            None,
            Some(json!({ "username": "nobody", "password": "Not-The-Password-1" })),
        )
        .await;

    assert_eq!(wrong_status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown_status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong, unknown);
    assert_eq!(wrong["msg"], "invalid username or password");
}

#[tokio::test]
async fn test_login_invalid_body() {
    let app = spawn_app().await;
    let request = Request::builder()
        .method("POST")
        .uri(LOGIN)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "invalid body");
}

#[tokio::test]
async fn test_check_requires_bearer_framing() {
    let app = spawn_app().await;
    let token = app.login(FOUNDER, FOUNDER_PASSWORD).await;

    let (status, body) = app.post(CHECK, Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "invalid token");

    let (status, body) = app.post(CHECK, None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "no token provided");
}

#[tokio::test]
async fn test_check_rejects_deleted_account() {
    let app = spawn_app().await;
    let token = app.login(FOUNDER, FOUNDER_PASSWORD).await;

    app.auth.store().delete_by_username(FOUNDER).await.unwrap();

    let (status, body) = app.post(CHECK, Some(&auth_header(&token)), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "user not found");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = spawn_app().await;

    let (status, body) = app.post("/api/v1/auth/logout", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert_eq!(body["msg"], "not found");
}

#[tokio::test]
async fn test_client_errors_do_not_stop_server() {
    let mut app = spawn_app().await;

    app.post(CHECK, Some("Bearer garbage"), None).await;

    let pending =
        tokio::time::timeout(std::time::Duration::from_millis(20), app.fatal_rx.recv()).await;
    assert!(pending.is_err());
}
