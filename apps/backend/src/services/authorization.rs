//! Sign-up, sign-in and token verification.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::adapters::users_sea::UserCreate;
use crate::auth::jwt::TokenCodec;
use crate::auth::password::{hash_password, verify_password, PasswordError};
use crate::errors::ServiceError;
use crate::logging::pii::Redacted;
use crate::repos::users::UserStore;
use crate::state::security_config::SecurityConfig;

/// Sign-up candidate. The password is plaintext and only lives for the
/// duration of the request.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Authorization capability used by the HTTP layer.
#[async_trait]
pub trait Authorization: Send + Sync {
    /// Hash the password, persist the user and return the new id.
    async fn create_user(&self, candidate: NewUser) -> Result<i64, ServiceError>;

    /// Check credentials and mint an access token for the user.
    async fn generate_token(&self, username: &str, password: &str)
        -> Result<String, ServiceError>;

    /// Resolve a bearer token to its subject id.
    fn parse_token(&self, token: &str) -> Result<i64, ServiceError>;
}

/// Production `Authorization` over a credential store and the token codec.
pub struct AuthService<S> {
    users: S,
    tokens: TokenCodec,
    token_ttl: Duration,
}

impl<S: UserStore> AuthService<S> {
    pub fn new(users: S, security: &SecurityConfig) -> Self {
        Self {
            users,
            tokens: TokenCodec::new(security),
            token_ttl: security.token_ttl,
        }
    }

    pub fn into_shared(self) -> Arc<dyn Authorization>
    where
        S: 'static,
    {
        Arc::new(self)
    }
}

#[async_trait]
impl<S: UserStore> Authorization for AuthService<S> {
    async fn create_user(&self, candidate: NewUser) -> Result<i64, ServiceError> {
        let NewUser {
            name,
            username,
            password,
        } = candidate;

        let password_hash = run_blocking(move || hash_password(&password)).await??;

        let id = self
            .users
            .create_user(UserCreate::new(name, username.clone(), password_hash))
            .await?;

        info!(user_id = id, username = %Redacted(&username), "User created");
        Ok(id)
    }

    async fn generate_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<String, ServiceError> {
        let user = self
            .users
            .find_user_by_username(username)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        let password = password.to_string();
        let stored = user.password_hash.clone();
        match run_blocking(move || verify_password(&password, &stored)).await? {
            Ok(()) => {}
            Err(PasswordError::CorruptHash) => {
                return Err(ServiceError::Internal(
                    "stored credentials are unreadable".to_string(),
                ))
            }
            Err(_) => return Err(ServiceError::InvalidCredentials),
        }

        let token = self
            .tokens
            .issue(user.id, self.token_ttl, SystemTime::now())
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        debug!(user_id = user.id, "Access token issued");
        Ok(token)
    }

    fn parse_token(&self, token: &str) -> Result<i64, ServiceError> {
        self.tokens
            .verify(token, SystemTime::now())
            .map_err(|e| ServiceError::Unauthorized(e.to_string()))
    }
}

/// Argon2 is CPU-heavy; keep it off the request worker.
async fn run_blocking<F, T>(f: F) -> Result<T, ServiceError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServiceError::Internal(format!("blocking task failed: {e}")))
}
