//! Unique test data, so tests sharing a database never collide.

use ulid::Ulid;

/// `{prefix}-{ulid}`
pub fn unique_str(prefix: &str) -> String {
    format!("{prefix}-{}", Ulid::new())
}

/// Lowercase username that is unique per call.
pub fn unique_username(prefix: &str) -> String {
    unique_str(prefix).to_lowercase()
}
