use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use super::request_trace::TraceId;
use crate::extractors::identity::Identity;

/// Emits one `request_completed` event per request, levelled by status class.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            // Extensions are read after the call: the trace id and the
            // identity are attached by inner middleware.
            let (status, trace_id, user_id) = match &result {
                Ok(res) => {
                    let ext = res.request().extensions();
                    (
                        res.status(),
                        ext.get::<TraceId>().map(|t| t.0.clone()),
                        ext.get::<Identity>().map(|i| i.user_id),
                    )
                }
                Err(err) => (err.as_response_error().status_code(), None, None),
            };
            let trace_id = trace_id.unwrap_or_else(|| "unknown".to_string());

            log_completed(&method, &path, status, start, &trace_id, user_id);
            result
        })
    }
}

fn log_completed(
    method: &str,
    path: &str,
    status: StatusCode,
    start: Instant,
    trace_id: &str,
    user_id: Option<i64>,
) {
    let duration_us = start.elapsed().as_micros() as u64;
    let status_code = status.as_u16();

    if status.is_server_error() {
        error!(http.method = %method, url.path = %path, http.status_code = status_code, duration_us, trace_id = %trace_id, user_id = ?user_id, message = "request_completed");
    } else if status.is_client_error() {
        warn!(http.method = %method, url.path = %path, http.status_code = status_code, duration_us, trace_id = %trace_id, user_id = ?user_id, message = "request_completed");
    } else {
        info!(http.method = %method, url.path = %path, http.status_code = status_code, duration_us, trace_id = %trace_id, user_id = ?user_id, message = "request_completed");
    }
}
