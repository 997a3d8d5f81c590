#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;

pub use auth::{Claims, TokenCodec, TokenError};
pub use config::auth::security_config_from_env;
pub use config::db::{db_url, DbOwner, DbProfile};
pub use error::AppError;
pub use errors::{DomainError, ServiceError};
pub use extractors::{get_user_id, ContextError, CurrentUser, Identity};
pub use infra::db::connect_db;
pub use infra::state::build_state;
pub use middleware::{
    cors_middleware, RequestTrace, StructuredLogger, TraceSpan, UserIdentity,
};
pub use services::{AuthService, Authorization, NewUser};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
