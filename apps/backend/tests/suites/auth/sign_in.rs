use actix_web::http::{header, StatusCode};
use actix_web::test;
use backend_test_support::error_body::assert_error_body;
use serde_json::{json, Value};
use todo_backend::ServiceError;

use crate::support::app::{init_app, mock_state};
use crate::support::mock_auth::{Call, MockAuthorization};

fn sign_in(body: Value) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/auth/sign-in")
        .set_json(body)
        .to_request()
}

#[actix_web::test]
async fn returns_token() {
    let mock = MockAuthorization::new();
    mock.expect_generate_token(Ok("signed.token.value".into()));
    let app = init_app(mock_state(&mock).await).await;

    let resp = test::call_service(&app, sign_in(json!({"username": "test", "password": "qwerty"}))).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"token": "signed.token.value"}));
    assert_eq!(
        mock.calls(),
        vec![Call::GenerateToken {
            username: "test".into(),
            password: "qwerty".into(),
        }]
    );
}

#[actix_web::test]
async fn bad_credentials_are_unauthorized() {
    let mock = MockAuthorization::new();
    mock.expect_generate_token(Err(ServiceError::InvalidCredentials));
    let app = init_app(mock_state(&mock).await).await;

    let resp = test::call_service(&app, sign_in(json!({"username": "test", "password": "nope"}))).await;

    assert_eq!(
        resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
    assert_error_body(
        resp,
        StatusCode::UNAUTHORIZED,
        "invalid username or password",
    )
    .await;
}

#[actix_web::test]
async fn empty_password_is_invalid_input() {
    let mock = MockAuthorization::new();
    let app = init_app(mock_state(&mock).await).await;

    let resp = test::call_service(&app, sign_in(json!({"username": "test", "password": ""}))).await;

    assert_error_body(resp, StatusCode::BAD_REQUEST, "invalid input body").await;
    assert!(mock.calls().is_empty());
}

#[actix_web::test]
async fn store_failure_is_internal_error() {
    let mock = MockAuthorization::new();
    mock.expect_generate_token(Err(ServiceError::Internal("Database unavailable".into())));
    let app = init_app(mock_state(&mock).await).await;

    let resp = test::call_service(&app, sign_in(json!({"username": "test", "password": "qwerty"}))).await;

    assert_error_body(resp, StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable").await;
}
