use std::env;

use crate::error::AppError;

/// Which database the process talks to.
#[derive(Debug, Clone, PartialEq)]
pub enum DbProfile {
    Prod,
    /// Test database; its name must end in `_test`
    Test,
}

/// Which role the connection authenticates as.
#[derive(Debug, Clone, PartialEq)]
pub enum DbOwner {
    /// Application role used while serving requests
    App,
    /// Schema owner used by migrations
    Owner,
}

/// Postgres connection settings resolved from the environment.
#[derive(Clone, PartialEq)]
pub struct DbSettings {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl DbSettings {
    pub fn from_env(profile: &DbProfile, owner: &DbOwner) -> Result<Self, AppError> {
        let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port = match env::var("POSTGRES_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!("POSTGRES_PORT must be a port number, got '{raw}'"))
            })?,
            Err(_) => 5432,
        };

        let database = match profile {
            DbProfile::Prod => must_var("PROD_DB")?,
            DbProfile::Test => {
                let name = must_var("TEST_DB")?;
                if !name.ends_with("_test") {
                    return Err(AppError::config(format!(
                        "Test profile requires database name to end with '_test', but got: '{name}'"
                    )));
                }
                name
            }
        };

        let (user_var, password_var) = match owner {
            DbOwner::App => ("APP_DB_USER", "APP_DB_PASSWORD"),
            DbOwner::Owner => ("TODO_OWNER_USER", "TODO_OWNER_PASSWORD"),
        };

        Ok(Self {
            host,
            port,
            database,
            username: must_var(user_var)?,
            password: must_var(password_var)?,
        })
    }

    pub fn url(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database
        )
    }
}

impl std::fmt::Debug for DbSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Database URL for `profile`/`owner`. `DATABASE_URL`, when set, wins.
pub fn db_url(profile: DbProfile, owner: DbOwner) -> Result<String, AppError> {
    if let Ok(url) = env::var("DATABASE_URL") {
        if !url.trim().is_empty() {
            return Ok(url);
        }
    }
    Ok(DbSettings::from_env(&profile, &owner)?.url())
}

fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
