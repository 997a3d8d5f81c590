//! Bearer-token identity middleware
//!
//! Wraps protected scopes. Resolves `Authorization: Bearer <token>` through the
//! application's `Authorization` service and stores the resulting `Identity`
//! in request extensions. Rejected requests never reach the inner service.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::error::AppError;
use crate::extractors::identity::Identity;
use crate::logging::security;
use crate::services::authorization::Authorization;
use crate::state::app_state::AppState;

pub struct UserIdentity;

impl<S, B> Transform<S, ServiceRequest> for UserIdentity
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = UserIdentityMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(UserIdentityMiddleware { service }))
    }
}

pub struct UserIdentityMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for UserIdentityMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let resolved = match req.app_data::<web::Data<AppState>>() {
            Some(state) => resolve_identity(
                req.headers().get(header::AUTHORIZATION),
                state.authorization.as_ref(),
            ),
            None => Err(AppError::internal("AppState not available")),
        };

        match resolved {
            Ok(user_id) => {
                // Identity must be in place before the inner service runs
                req.extensions_mut().insert(Identity { user_id });

                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(err) => {
                security::token_rejected(rejection_reason(&err), req.path());
                let res = req.error_response(err).map_into_right_body();
                Box::pin(async move { Ok(res) })
            }
        }
    }
}

/// Header-to-subject resolution. First failing step wins:
/// missing/empty header, malformed scheme, empty token, service rejection.
pub fn resolve_identity(
    header_value: Option<&HeaderValue>,
    authorization: &dyn Authorization,
) -> Result<i64, AppError> {
    let token = extract_bearer_token(header_value)?;

    authorization
        .parse_token(token)
        .map_err(|e| AppError::authorization_failure(e.to_string()))
}

/// Pull the token out of an `Authorization` header value.
pub fn extract_bearer_token(header_value: Option<&HeaderValue>) -> Result<&str, AppError> {
    let header_value = match header_value {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AppError::EmptyAuthHeader),
    };

    let header_str = header_value
        .to_str()
        .map_err(|_| AppError::InvalidAuthHeader)?;

    let (scheme, token) = header_str
        .split_once(' ')
        .ok_or(AppError::InvalidAuthHeader)?;
    if scheme != "Bearer" {
        return Err(AppError::InvalidAuthHeader);
    }

    if token.is_empty() {
        return Err(AppError::EmptyToken);
    }

    Ok(token)
}

fn rejection_reason(err: &AppError) -> &'static str {
    match err {
        AppError::EmptyAuthHeader => "empty_auth_header",
        AppError::InvalidAuthHeader => "invalid_auth_header",
        AppError::EmptyToken => "empty_token",
        AppError::AuthorizationFailure { .. } => "token_verification_failed",
        _ => "internal",
    }
}
