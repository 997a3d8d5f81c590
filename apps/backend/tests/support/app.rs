//! Test application builders.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use todo_backend::{
    build_state, routes, AppState, RequestTrace, SecurityConfig, StructuredLogger, TraceSpan,
};

use super::mock_auth::MockAuthorization;

pub async fn mock_state(mock: &MockAuthorization) -> AppState {
    build_state()
        .with_authorization(mock.shared())
        .build()
        .await
        .expect("state with mock authorization")
}

/// Real service over a fresh in-memory database.
pub async fn sqlite_state(security: SecurityConfig) -> AppState {
    build_state()
        .with_connection(backend_test_support::db::memory_db().await)
        .with_security(security)
        .build()
        .await
        .expect("state over in-memory sqlite")
}

/// Production routes and middleware stack (minus CORS) over `state`.
pub async fn init_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await
}
