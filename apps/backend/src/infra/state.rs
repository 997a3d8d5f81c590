use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::db::{DbOwner, DbProfile};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::repos::users::SeaUserStore;
use crate::services::authorization::{AuthService, Authorization};
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    db_profile: Option<DbProfile>,
    connection: Option<DatabaseConnection>,
    authorization: Option<Arc<dyn Authorization>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            db_profile: None,
            connection: None,
            authorization: None,
        }
    }

    /// Connect (and migrate) using the environment-derived settings for `profile`.
    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = Some(profile);
        self
    }

    /// Use an already-open connection, e.g. an in-memory SQLite database.
    pub fn with_connection(mut self, connection: DatabaseConnection) -> Self {
        self.connection = Some(connection);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    /// Substitute the authorization service; no database is needed then.
    pub fn with_authorization(mut self, authorization: Arc<dyn Authorization>) -> Self {
        self.authorization = Some(authorization);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let connection = match (self.connection, self.db_profile) {
            (Some(conn), _) => Some(conn),
            (None, Some(profile)) => Some(bootstrap_db(profile, DbOwner::App).await?),
            (None, None) => None,
        };

        match (connection, self.authorization) {
            (Some(conn), Some(authorization)) => Ok(AppState::new(conn, authorization)),
            (Some(conn), None) => {
                let authorization =
                    AuthService::new(SeaUserStore::new(conn.clone()), &self.security_config)
                        .into_shared();
                Ok(AppState::new(conn, authorization))
            }
            (None, Some(authorization)) => Ok(AppState::new_without_db(authorization)),
            (None, None) => Err(AppError::config(
                "application state needs a database or an authorization service",
            )),
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
