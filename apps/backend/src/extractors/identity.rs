//! Request-scoped identity written by the `UserIdentity` middleware.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use thiserror::Error;
use tracing::error;

use crate::error::AppError;

/// Authenticated subject stored in request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("user id not found")]
    NotSet,
}

/// Read the authenticated user id from the request context.
pub fn get_user_id<R: HttpMessage>(req: &R) -> Result<i64, ContextError> {
    req.extensions()
        .get::<Identity>()
        .map(|identity| identity.user_id)
        .ok_or(ContextError::NotSet)
}

/// Extractor for handlers mounted behind `UserIdentity`.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub id: i64,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            get_user_id(req)
                .map(|id| CurrentUser { id })
                .map_err(|e| {
                    // Only reachable when a handler is mounted outside the middleware.
                    error!(path = %req.path(), "CurrentUser extracted without identity");
                    AppError::internal(e.to_string())
                }),
        )
    }
}
