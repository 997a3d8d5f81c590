use tracing::warn;

use crate::logging::pii::Redacted;

/// Log a security-relevant sign-in failure event.
pub fn login_failed(reason: &str, username: &str) {
    warn!(
        event = "SECURITY_LOGIN_FAILED",
        username = %Redacted(username),
        reason,
        "Authentication failure"
    );
}

/// Log a rejected bearer credential on a protected route.
pub fn token_rejected(reason: &str, path: &str) {
    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        reason,
        path,
        "Bearer token rejected"
    );
}
