//! Repository traits for the service layer.

pub mod users;

pub use users::{SeaUserStore, UserRecord, UserStore};
