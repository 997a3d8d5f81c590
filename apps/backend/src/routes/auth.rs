use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::errors::ServiceError;
use crate::extractors::{Validate, ValidatedJson};
use crate::logging::security;
use crate::services::authorization::NewUser;
use crate::state::app_state::AppState;

#[derive(Deserialize)]
pub struct SignUpRequest {
    pub name: String,
    pub username: String,
    pub password: String,
}

impl Validate for SignUpRequest {
    fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.username.is_empty() && !self.password.is_empty()
    }
}

#[derive(Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

impl Validate for SignInRequest {
    fn is_valid(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub token: String,
}

/// Create an account and return its id.
async fn sign_up(
    body: ValidatedJson<SignUpRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let SignUpRequest {
        name,
        username,
        password,
    } = body.into_inner();

    let id = app_state
        .authorization
        .create_user(NewUser {
            name,
            username,
            password,
        })
        .await?;

    info!(user_id = id, "User signed up");
    Ok(HttpResponse::Ok().json(SignUpResponse { id }))
}

/// Exchange a username and password for a bearer token.
async fn sign_in(
    body: ValidatedJson<SignInRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let token = app_state
        .authorization
        .generate_token(&body.username, &body.password)
        .await
        .inspect_err(|e| {
            if matches!(e, ServiceError::InvalidCredentials) {
                security::login_failed("invalid_credentials", &body.username);
            }
        })?;

    Ok(HttpResponse::Ok().json(SignInResponse { token }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/sign-up", web::post().to(sign_up))
        .route("/sign-in", web::post().to(sign_in));
}
