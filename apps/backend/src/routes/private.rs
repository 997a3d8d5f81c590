use actix_web::{web, HttpResponse, Result};
use serde::Serialize;

use crate::error::AppError;
use crate::extractors::CurrentUser;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: i64,
}

/// Echo the authenticated caller's id.
async fn me(user: CurrentUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(MeResponse { id: user.id }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/me", web::get().to(me));
}
