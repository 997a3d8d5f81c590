use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_body;
use serde_json::{json, Value};
use todo_backend::{NewUser, ServiceError};

use crate::support::app::{init_app, mock_state};
use crate::support::mock_auth::{Call, MockAuthorization};

fn sign_up(body: Value) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/auth/sign-up")
        .set_json(body)
        .to_request()
}

#[actix_web::test]
async fn returns_new_id() {
    let mock = MockAuthorization::new();
    mock.expect_create_user(Ok(1));
    let app = init_app(mock_state(&mock).await).await;

    let resp = test::call_service(
        &app,
        sign_up(json!({"name": "Test", "username": "test", "password": "qwerty"})),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"id": 1}));
    assert_eq!(
        mock.calls(),
        vec![Call::CreateUser(NewUser {
            name: "Test".into(),
            username: "test".into(),
            password: "qwerty".into(),
        })]
    );
}

#[actix_web::test]
async fn missing_or_empty_field_is_invalid_input() {
    let mock = MockAuthorization::new();
    let app = init_app(mock_state(&mock).await).await;

    for body in [
        json!({"username": "test", "password": "qwerty"}),
        json!({"name": "Test", "username": "", "password": "qwerty"}),
        json!({"name": "Test", "username": "test"}),
        json!({"name": 7, "username": "test", "password": "qwerty"}),
    ] {
        let resp = test::call_service(&app, sign_up(body)).await;
        assert_error_body(resp, StatusCode::BAD_REQUEST, "invalid input body").await;
    }

    let req = test::TestRequest::post()
        .uri("/auth/sign-up")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_body(resp, StatusCode::BAD_REQUEST, "invalid input body").await;

    assert!(mock.calls().is_empty(), "service must not be called");
}

#[actix_web::test]
async fn service_failure_is_internal_error() {
    let mock = MockAuthorization::new();
    mock.expect_create_user(Err(ServiceError::Internal("service failure".into())));
    let app = init_app(mock_state(&mock).await).await;

    let resp = test::call_service(
        &app,
        sign_up(json!({"name": "Test", "username": "test", "password": "qwerty"})),
    )
    .await;

    assert_error_body(resp, StatusCode::INTERNAL_SERVER_ERROR, "service failure").await;
}

#[actix_web::test]
async fn duplicate_username_is_internal_error() {
    let mock = MockAuthorization::new();
    mock.expect_create_user(Err(ServiceError::Conflict("username already taken".into())));
    let app = init_app(mock_state(&mock).await).await;

    let resp = test::call_service(
        &app,
        sign_up(json!({"name": "Test", "username": "test", "password": "qwerty"})),
    )
    .await;

    assert_error_body(
        resp,
        StatusCode::INTERNAL_SERVER_ERROR,
        "username already taken",
    )
    .await;
}
