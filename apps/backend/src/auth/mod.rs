pub mod claims;
pub mod jwt;
pub mod password;

pub use claims::Claims;
pub use jwt::{TokenCodec, TokenError};
