//! Identity claim carried inside backend-issued access tokens.

use serde::{Deserialize, Serialize};

/// Claims included in our backend-issued access tokens.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject user id, as a decimal string (RFC 7519 `sub`)
    pub sub: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

impl Claims {
    pub fn new(subject_id: i64, iat: i64, exp: i64) -> Self {
        Self {
            sub: subject_id.to_string(),
            iat,
            exp,
        }
    }

    /// Numeric subject id, or `None` if `sub` is not an integer.
    pub fn subject_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}
