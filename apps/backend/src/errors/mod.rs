//! Error handling for the todo backend.

pub mod domain;
pub mod service;

pub use domain::DomainError;
pub use service::ServiceError;
