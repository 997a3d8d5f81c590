//! Credential store: durable user records keyed by unique username.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::adapters::users_sea as users_adapter;
use crate::adapters::users_sea::UserCreate;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

/// Stored user as seen by the authorization service.
#[derive(Clone, PartialEq)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub password_hash: String,
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user and return the store-assigned id.
    async fn create_user(&self, user: UserCreate) -> Result<i64, DomainError>;

    async fn find_user_by_username(&self, username: &str)
        -> Result<Option<UserRecord>, DomainError>;
}

/// `UserStore` backed by a SeaORM connection.
#[derive(Debug, Clone)]
pub struct SeaUserStore {
    db: DatabaseConnection,
}

impl SeaUserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for SeaUserStore {
    async fn create_user(&self, user: UserCreate) -> Result<i64, DomainError> {
        let model = users_adapter::create_user(&self.db, user)
            .await
            .map_err(map_db_err)?;
        Ok(model.id)
    }

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, DomainError> {
        let model = users_adapter::find_user_by_username(&self.db, username)
            .await
            .map_err(map_db_err)?;
        Ok(model.map(UserRecord::from))
    }
}

impl From<crate::entities::users::Model> for UserRecord {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            username: model.username,
            password_hash: model.password_hash,
        }
    }
}
