use actix_web::error::ResponseError;
use actix_web::http::{header, StatusCode};
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::ServiceError;

/// Error body written for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

/// HTTP-facing error. The `Display` text is exactly what lands in the
/// response body's `message` field.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid input body")]
    InvalidInput,
    #[error("empty auth header")]
    EmptyAuthHeader,
    #[error("invalid auth header")]
    InvalidAuthHeader,
    #[error("token is empty")]
    EmptyToken,
    #[error("invalid username or password")]
    InvalidCredentials,
    /// The token was presented but the authorization service rejected it.
    #[error("{detail}")]
    AuthorizationFailure { detail: String },
    /// Authorization service failure outside token handling (conflict, store error).
    #[error("{detail}")]
    Service { detail: String },
    #[error("{detail}")]
    Internal { detail: String },
    #[error("{detail}")]
    Config { detail: String },
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput => StatusCode::BAD_REQUEST,
            AppError::EmptyAuthHeader => StatusCode::UNAUTHORIZED,
            AppError::InvalidAuthHeader => StatusCode::UNAUTHORIZED,
            AppError::EmptyToken => StatusCode::UNAUTHORIZED,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            // Token verification failures are reported as 500, matching the
            // established contract of the identity middleware.
            AppError::AuthorizationFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Service { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn authorization_failure(detail: impl Into<String>) -> Self {
        Self::AuthorizationFailure {
            detail: detail.into(),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::InvalidCredentials => AppError::InvalidCredentials,
            ServiceError::Unauthorized(detail) => AppError::AuthorizationFailure { detail },
            ServiceError::Conflict(detail) | ServiceError::Internal(detail) => {
                AppError::Service { detail }
            }
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::internal(format!("db error: {e}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let mut builder = HttpResponse::build(status);

        // RFC 7235: a 401 names the scheme the client should use
        if status == StatusCode::UNAUTHORIZED {
            builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
        }

        builder.json(ErrorBody {
            message: self.to_string(),
        })
    }
}
