//! Sign-up, sign-in and protected access against the real service and an
//! in-memory SQLite database.

use std::time::{Duration, SystemTime};

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_body;
use backend_test_support::unique_helpers::unique_username;
use serde_json::{json, Value};
use todo_backend::{SecurityConfig, TokenCodec};

use crate::common::bearer;
use crate::support::app::{init_app, sqlite_state};

const SECRET: &str = "end-to-end-secret";

#[actix_web::test]
async fn sign_up_sign_in_and_call_protected_route() {
    let app = init_app(sqlite_state(SecurityConfig::new(SECRET)).await).await;
    let username = unique_username("alice");

    let req = test::TestRequest::post()
        .uri("/auth/sign-up")
        .set_json(json!({"name": "Alice", "username": username, "password": "qwerty"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_i64().expect("numeric id");

    let req = test::TestRequest::post()
        .uri("/auth/sign-in")
        .set_json(json!({"username": username, "password": "qwerty"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let signed_in: Value = test::read_body_json(resp).await;
    let token = signed_in["token"].as_str().expect("token string").to_string();

    let req = test::TestRequest::get()
        .uri("/api/me")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let me: Value = test::read_body_json(resp).await;
    assert_eq!(me, json!({"id": id}));
}

#[actix_web::test]
async fn duplicate_username_is_rejected() {
    let app = init_app(sqlite_state(SecurityConfig::new(SECRET)).await).await;
    let body = json!({"name": "Bob", "username": "bob", "password": "qwerty"});

    let first = test::TestRequest::post()
        .uri("/auth/sign-up")
        .set_json(&body)
        .to_request();
    assert_eq!(test::call_service(&app, first).await.status(), StatusCode::OK);

    let second = test::TestRequest::post()
        .uri("/auth/sign-up")
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, second).await;
    assert_error_body(
        resp,
        StatusCode::INTERNAL_SERVER_ERROR,
        "username already taken",
    )
    .await;
}

#[actix_web::test]
async fn wrong_password_and_unknown_user_are_unauthorized() {
    let app = init_app(sqlite_state(SecurityConfig::new(SECRET)).await).await;

    let req = test::TestRequest::post()
        .uri("/auth/sign-up")
        .set_json(json!({"name": "Carol", "username": "carol", "password": "right"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    for (username, password) in [("carol", "wrong"), ("nobody", "right")] {
        let req = test::TestRequest::post()
            .uri("/auth/sign-in")
            .set_json(json!({"username": username, "password": password}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_error_body(
            resp,
            StatusCode::UNAUTHORIZED,
            "invalid username or password",
        )
        .await;
    }
}

#[actix_web::test]
async fn expired_foreign_and_tampered_tokens_fail() {
    let security = SecurityConfig::new(SECRET);
    let app = init_app(sqlite_state(security.clone()).await).await;

    let codec = TokenCodec::new(&security);
    let expired = codec
        .issue(
            1,
            Duration::from_secs(60),
            SystemTime::now() - Duration::from_secs(3600),
        )
        .unwrap();

    let foreign = TokenCodec::new(&SecurityConfig::new("some-other-secret"))
        .issue(1, Duration::from_secs(60), SystemTime::now())
        .unwrap();

    let cases = [
        (expired, "token has expired"),
        (foreign, "token signature is invalid"),
        ("not-a-token".to_string(), "token is malformed"),
    ];

    for (token, message) in cases {
        let req = test::TestRequest::get()
            .uri("/api/me")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_error_body(resp, StatusCode::INTERNAL_SERVER_ERROR, message).await;
    }
}

#[actix_web::test]
async fn health_reports_database_and_migrations() {
    let app = init_app(sqlite_state(SecurityConfig::new(SECRET)).await).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert_eq!(body["migrations"], "m20260301_000001_create_users");
}
