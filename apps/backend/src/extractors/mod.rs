pub mod identity;
pub mod validated_json;

pub use identity::{get_user_id, ContextError, CurrentUser, Identity};
pub use validated_json::{Validate, ValidatedJson};
