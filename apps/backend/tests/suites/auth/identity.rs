use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App, HttpRequest, HttpResponse};
use backend_test_support::error_body::assert_error_body;
use serde_json::{json, Value};
use todo_backend::{get_user_id, ServiceError, UserIdentity};

use crate::common::bearer;
use crate::support::app::{init_app, mock_state};
use crate::support::mock_auth::{Call, MockAuthorization};

/// Downstream handler that echoes the context value and counts invocations.
async fn echo_user_id(req: HttpRequest, hits: web::Data<AtomicUsize>) -> HttpResponse {
    hits.fetch_add(1, Ordering::SeqCst);
    match get_user_id(&req) {
        Ok(id) => HttpResponse::Ok().body(id.to_string()),
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}

#[actix_web::test]
async fn header_matrix() {
    let cases: &[(Option<&str>, StatusCode, &str)] = &[
        (None, StatusCode::UNAUTHORIZED, "empty auth header"),
        (Some(""), StatusCode::UNAUTHORIZED, "empty auth header"),
        (Some("Bearr token"), StatusCode::UNAUTHORIZED, "invalid auth header"),
        (Some("Bearer"), StatusCode::UNAUTHORIZED, "invalid auth header"),
        (Some("Basic dXNlcjpwYXNz"), StatusCode::UNAUTHORIZED, "invalid auth header"),
        (Some("Bearer "), StatusCode::UNAUTHORIZED, "token is empty"),
    ];

    let mock = MockAuthorization::new();
    let app = init_app(mock_state(&mock).await).await;

    for (value, status, message) in cases {
        let mut req = test::TestRequest::get().uri("/api/me");
        if let Some(value) = value {
            req = req.insert_header((header::AUTHORIZATION, *value));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(
            resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer",
            "{value:?}"
        );
        assert_error_body(resp, *status, message).await;
    }

    assert!(mock.calls().is_empty(), "header failures never reach the service");
}

#[actix_web::test]
async fn valid_token_reaches_handler_with_user_id() {
    let mock = MockAuthorization::new();
    mock.expect_parse_token(Ok(1));
    let hits = web::Data::new(AtomicUsize::new(0));

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(mock_state(&mock).await))
            .app_data(hits.clone())
            .service(
                web::scope("/protected")
                    .wrap(UserIdentity)
                    .route("", web::get().to(echo_user_id)),
            ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(bearer("token"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "1");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(mock.calls(), vec![Call::ParseToken("token".into())]);
}

#[actix_web::test]
async fn rejected_token_never_reaches_handler() {
    let mock = MockAuthorization::new();
    mock.expect_parse_token(Err(ServiceError::Unauthorized("failed to parse token".into())));
    let hits = Arc::new(AtomicUsize::new(0));

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(mock_state(&mock).await))
            .app_data(web::Data::from(hits.clone()))
            .service(
                web::scope("/protected")
                    .wrap(UserIdentity)
                    .route("", web::get().to(echo_user_id)),
            ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(bearer("token"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.headers().get(header::WWW_AUTHENTICATE).is_none());
    assert_error_body(
        resp,
        StatusCode::INTERNAL_SERVER_ERROR,
        "failed to parse token",
    )
    .await;
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn me_route_returns_caller_id() {
    let mock = MockAuthorization::new();
    mock.expect_parse_token(Ok(42));
    let app = init_app(mock_state(&mock).await).await;

    let req = test::TestRequest::get()
        .uri("/api/me")
        .insert_header(bearer("token"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"id": 42}));
}

#[actix_web::test]
async fn public_routes_skip_the_middleware() {
    let mock = MockAuthorization::new();
    mock.expect_create_user(Ok(3));
    let app = init_app(mock_state(&mock).await).await;

    let req = test::TestRequest::post()
        .uri("/auth/sign-up")
        .set_json(json!({"name": "Test", "username": "test", "password": "qwerty"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(mock
        .calls()
        .iter()
        .all(|call| !matches!(call, Call::ParseToken(_))));
}
