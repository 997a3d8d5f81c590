//! Backend test support utilities
//!
//! Shared by unit and integration tests: logging setup, an in-memory
//! migrated database, error-body assertions and unique test data.

pub mod db;
pub mod error_body;
pub mod logging;
pub mod unique_helpers;
