use std::ops::{Deref, DerefMut};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::Error as JsonError;
use tracing::debug;

use crate::error::AppError;

/// Largest request body the JSON extractor buffers.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Semantic checks applied after a body deserializes.
pub trait Validate {
    /// Return `false` when a required field is empty or otherwise unusable.
    fn is_valid(&self) -> bool;
}

/// JSON body extractor. Any read, parse or validation failure becomes
/// `AppError::InvalidInput` (400 `{"message":"invalid input body"}`).
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    /// Extract the inner value from the ValidatedJson wrapper
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for ValidatedJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(_req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();

        Box::pin(async move {
            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    debug!(error = %e, "Failed to read request body chunk");
                    AppError::InvalidInput
                })?;
                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    debug!(limit = MAX_BODY_BYTES, "Request body too large");
                    return Err(AppError::InvalidInput);
                }
                body.extend_from_slice(&chunk);
            }

            let parsed = serde_json::from_slice::<T>(&body).map_err(|e| {
                // serde messages can echo field values; log the category only
                debug!(
                    category = classify_json_error(&e),
                    body_size = body.len(),
                    "JSON parsing failed"
                );
                AppError::InvalidInput
            })?;

            if !parsed.is_valid() {
                debug!("Request body failed validation");
                return Err(AppError::InvalidInput);
            }

            Ok(ValidatedJson(parsed))
        })
    }
}

fn classify_json_error(error: &JsonError) -> &'static str {
    match error.classify() {
        serde_json::error::Category::Syntax => "syntax",
        serde_json::error::Category::Eof => "eof",
        serde_json::error::Category::Data => "data",
        serde_json::error::Category::Io => "io",
    }
}
