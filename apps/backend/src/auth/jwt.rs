use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use super::claims::Claims;
use crate::state::security_config::SecurityConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("failed to encode token: {0}")]
    Encode(String),
}

/// Issues and verifies HS256 access tokens.
///
/// Keys are derived once from the configured secret; the codec holds no
/// mutable state and can be shared freely across request handlers.
#[derive(Clone)]
pub struct TokenCodec {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenCodec {
    pub fn new(security: &SecurityConfig) -> Self {
        Self {
            algorithm: security.algorithm,
            encoding_key: EncodingKey::from_secret(&security.jwt_secret),
            decoding_key: DecodingKey::from_secret(&security.jwt_secret),
        }
    }

    /// Mint a token for `subject_id`, valid from `now` for `ttl`.
    pub fn issue(
        &self,
        subject_id: i64,
        ttl: Duration,
        now: SystemTime,
    ) -> Result<String, TokenError> {
        let iat = unix_seconds(now)?;
        let exp = i64::try_from(ttl.as_secs())
            .ok()
            .and_then(|ttl| iat.checked_add(ttl))
            .ok_or_else(|| TokenError::Encode("token lifetime is out of range".to_string()))?;

        encode(
            &Header::new(self.algorithm),
            &Claims::new(subject_id, iat, exp),
            &self.encoding_key,
        )
        .map_err(|e| TokenError::Encode(e.to_string()))
    }

    /// Verify a token at instant `now` and return its subject id.
    ///
    /// Checks run in order: structure, signature, expiry. A token is expired
    /// once `now >= exp`.
    pub fn verify(&self, token: &str, now: SystemTime) -> Result<i64, TokenError> {
        let claims = self.decode_claims(token)?;
        let subject_id = claims.subject_id().ok_or(TokenError::Malformed)?;

        let now = unix_seconds(now).map_err(|_| TokenError::Expired)?;
        if now >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(subject_id)
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        // jsonwebtoken's exp check has a leeway and accepts exp == now, so
        // expiry is checked by `verify` instead.
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })
    }
}

fn unix_seconds(at: SystemTime) -> Result<i64, TokenError> {
    at.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .map_err(|_| TokenError::Encode("system time is before the unix epoch".to_string()))
}
