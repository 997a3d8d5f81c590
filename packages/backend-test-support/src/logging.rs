//! Test logging initialization
//!
//! Level comes from `TEST_LOG`, then `RUST_LOG`, then `warn`.
//! Set `TEST_LOG_JSON=1` to get the same JSON lines the server writes.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Idempotent; safe to call from every test and from `ctor` hooks.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        let builder = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time();

        // try_init: another subscriber may already be installed
        if std::env::var("TEST_LOG_JSON").is_ok_and(|v| v == "1") {
            builder.json().try_init().ok();
        } else {
            builder.try_init().ok();
        }
    });
}
