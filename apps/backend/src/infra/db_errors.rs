//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repositories convert it here so that the
//! raw database message is logged but never travels further up.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind};
use crate::logging::pii::redact;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract table.column from SQLite "UNIQUE constraint failed: table.column" error messages.
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    let prefix = error_msg.find("UNIQUE constraint failed: ")?;
    let rest = &error_msg[prefix + "UNIQUE constraint failed: ".len()..];
    rest.split(|c: char| c.is_whitespace() || c == '"' || c == ')')
        .next()
        .filter(|s| !s.is_empty())
}

/// Map a unique-violation site (SQLite `table.column` or a Postgres constraint name)
/// to a domain conflict.
fn map_unique_violation(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    let sqlite_hit = extract_sqlite_table_column(error_msg) == Some("users.username");
    let postgres_hit = error_msg.contains("users_username_key")
        || error_msg.contains("idx_users_username_unique");

    if sqlite_hit || postgres_hit {
        return Some((ConflictKind::UniqueUsername, "username already taken"));
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    if let sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) = &e {
        warn!(raw_error = %redact(&error_msg), "Database unavailable");
        return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(raw_error = %redact(&error_msg), "Unique constraint violation");

        if let Some((kind, detail)) = map_unique_violation(&error_msg) {
            return DomainError::conflict(kind, detail);
        }

        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if error_msg.contains("timeout") || error_msg.contains("pool timed out") {
        warn!(raw_error = %redact(&error_msg), "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(raw_error = %redact(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
