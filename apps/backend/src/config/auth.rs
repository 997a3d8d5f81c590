use std::env;
use std::time::Duration;

use crate::error::AppError;
use crate::state::security_config::{SecurityConfig, DEFAULT_TOKEN_TTL};

/// Signing secret from `BACKEND_JWT_SECRET`. Required and non-empty.
pub fn jwt_secret() -> Result<String, AppError> {
    match env::var("BACKEND_JWT_SECRET") {
        Ok(secret) if !secret.is_empty() => Ok(secret),
        Ok(_) => Err(AppError::config("BACKEND_JWT_SECRET must not be empty")),
        Err(_) => Err(AppError::config("BACKEND_JWT_SECRET must be set")),
    }
}

/// Token lifetime from `BACKEND_TOKEN_TTL_SECS`, defaulting to 12 hours.
pub fn token_ttl() -> Result<Duration, AppError> {
    let raw = match env::var("BACKEND_TOKEN_TTL_SECS") {
        Ok(raw) => raw,
        Err(_) => return Ok(DEFAULT_TOKEN_TTL),
    };

    // Token timestamps are signed seconds, so the lifetime must fit in an i64
    match raw.trim().parse::<i64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs.unsigned_abs())),
        _ => Err(AppError::config(format!(
            "BACKEND_TOKEN_TTL_SECS must be a positive integer, got '{raw}'"
        ))),
    }
}

pub fn security_config_from_env() -> Result<SecurityConfig, AppError> {
    Ok(SecurityConfig::new(jwt_secret()?.into_bytes()).with_token_ttl(token_ttl()?))
}
