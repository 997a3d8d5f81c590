use migration::{migrate, MigrationCommand};
use sea_orm::{Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbOwner, DbProfile};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Unified database connector that supports different profiles and owners.
/// This function does NOT run any migrations.
pub async fn connect_db(
    profile: DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let database_url = db_url(profile, owner)?;
    let conn = Database::connect(&database_url).await?;
    Ok(conn)
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(
    profile: DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(profile.clone(), owner).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    info!(?profile, "Database ready");
    Ok(conn)
}

/// Access the database connection from AppState.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state
        .db()
        .ok_or_else(|| AppError::internal("Database connection not available"))
}
