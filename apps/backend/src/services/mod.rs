pub mod authorization;

pub use authorization::{AuthService, Authorization, NewUser};
