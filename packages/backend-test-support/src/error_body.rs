//! Assertions for the `{"message": ...}` error body.

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::test;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub message: String,
}

/// Assert status and exact message, returning the parsed body.
pub async fn assert_error_body<B>(
    resp: ServiceResponse<B>,
    status: StatusCode,
    message: &str,
) -> ErrorBody
where
    B: MessageBody,
{
    assert_eq!(resp.status(), status, "unexpected status");

    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.starts_with("application/json"),
        "expected JSON error body, got content-type '{content_type}'"
    );

    let bytes = test::read_body(resp).await;
    let body: ErrorBody = serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        panic!(
            "error body is not {{\"message\": ..}}: {e}; raw: {}",
            String::from_utf8_lossy(&bytes)
        )
    });
    assert_eq!(body.message, message);
    body
}
