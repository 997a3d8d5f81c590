use std::env;

use actix_cors::Cors;
use actix_web::http::header;

const FALLBACK_ORIGINS: &[&str] = &["http://localhost:3000", "http://127.0.0.1:3000"];

/// CORS policy from `CORS_ALLOWED_ORIGINS` (comma separated). Falls back to
/// localhost when nothing valid is configured.
pub fn cors_middleware() -> Cors {
    let origins = allowed_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![
            header::HeaderName::from_static("x-request-id"),
            header::WWW_AUTHENTICATE,
        ])
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(&origin);
    }
    cors
}

/// Keep only `http(s)://` entries; drop blanks and `null`.
pub fn allowed_origins(raw: &str) -> Vec<String> {
    let parsed: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.trim_end_matches('/').to_string())
        .collect();

    if parsed.is_empty() {
        FALLBACK_ORIGINS.iter().map(|s| s.to_string()).collect()
    } else {
        parsed
    }
}
