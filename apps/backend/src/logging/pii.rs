use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Compiled redaction patterns. All are vetted literals.
struct PiiPatterns {
    jwt: Regex,
    opaque_token: Regex,
}

static PATTERNS: LazyLock<PiiPatterns> = LazyLock::new(|| PiiPatterns {
    // header.payload.signature, each segment base64url
    #[allow(clippy::unwrap_used)]
    jwt: Regex::new(r"\b[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\b").unwrap(),
    // base64 / base64url / hex runs of 16+ chars
    #[allow(clippy::unwrap_used)]
    opaque_token: Regex::new(r"\b[A-Za-z0-9+/_-]{16,}={0,2}").unwrap(),
});

/// Replace bearer tokens and other opaque credential-like runs in free text.
///
/// JWTs are matched first so a whole token collapses into one marker.
pub fn redact(input: &str) -> String {
    let without_jwts = PATTERNS.jwt.replace_all(input, "[REDACTED_TOKEN]");
    PATTERNS
        .opaque_token
        .replace_all(&without_jwts, "[REDACTED_TOKEN]")
        .to_string()
}

/// Display wrapper for identifiers such as usernames: keeps the first
/// character and masks the rest.
pub struct Redacted<'a>(pub &'a str);

impl<'a> fmt::Display for Redacted<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.chars().next() {
            Some(first) => write!(f, "{first}***"),
            None => Ok(()),
        }
    }
}

impl<'a> fmt::Debug for Redacted<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
