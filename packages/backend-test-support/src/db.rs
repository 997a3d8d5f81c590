//! In-memory SQLite with the real schema applied.

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Fresh, fully migrated in-memory database. Each call is isolated.
///
/// The pool is pinned to one connection: every `sqlite::memory:` connection
/// would otherwise see its own empty database.
pub async fn memory_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let conn = Database::connect(options)
        .await
        .expect("in-memory sqlite should connect");
    Migrator::up(&conn, None)
        .await
        .expect("migrations should apply to a fresh database");
    conn
}
