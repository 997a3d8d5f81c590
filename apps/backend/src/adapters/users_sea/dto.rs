//! DTOs for users_sea adapter.

/// DTO for creating a new user. The password is already hashed.
#[derive(Clone, PartialEq, Eq)]
pub struct UserCreate {
    pub name: String,
    pub username: String,
    pub password_hash: String,
}

impl UserCreate {
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}

impl std::fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCreate")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}
