use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::services::authorization::Authorization;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Database connection (absent when a test substitutes the authorization service)
    db: Option<DatabaseConnection>,
    /// Sign-up, sign-in and token verification
    pub authorization: Arc<dyn Authorization>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, authorization: Arc<dyn Authorization>) -> Self {
        Self {
            db: Some(db),
            authorization,
        }
    }

    /// Create an AppState without a database connection (for testing)
    pub fn new_without_db(authorization: Arc<dyn Authorization>) -> Self {
        Self {
            db: None,
            authorization,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db.is_some())
            .finish_non_exhaustive()
    }
}
