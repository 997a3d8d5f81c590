#![allow(dead_code)]

use actix_web::http::header;

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// `Authorization` header tuple for test requests.
pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}
