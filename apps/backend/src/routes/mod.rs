use actix_web::web;

use crate::middleware::user_identity::UserIdentity;

pub mod auth;
pub mod health;
pub mod private;

/// Register every route. `/api/**` sits behind the bearer-token middleware;
/// `/health` and the credential endpoints are public. Sign-up and sign-in
/// live under `/auth` (`/auth/sign-up`, `/auth/sign-in`).
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").configure(health::configure_routes));
    cfg.service(web::scope("/auth").configure(auth::configure_routes));
    cfg.service(
        web::scope("/api")
            .wrap(UserIdentity)
            .configure(private::configure_routes),
    );
}
