//! Errors returned by the `Authorization` service.

use thiserror::Error;

use super::domain::DomainError;
use crate::auth::password::PasswordError;

/// Authorization-service failures. `Display` is the bare cause so the HTTP
/// layer can surface it as `{"message": ...}` unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Conflict(String),
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("{0}")]
    Internal(String),
    /// Wrapped token failure; the cause string comes from `TokenError`.
    #[error("{0}")]
    Unauthorized(String),
}

impl From<DomainError> for ServiceError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Conflict(_, detail) => ServiceError::Conflict(detail),
            DomainError::Infra(_, detail) => ServiceError::Internal(detail),
        }
    }
}

impl From<PasswordError> for ServiceError {
    fn from(_: PasswordError) -> Self {
        ServiceError::Internal("failed to hash password".to_string())
    }
}
