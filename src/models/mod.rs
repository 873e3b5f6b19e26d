//! Database models and DTOs for all domain entities.

pub mod activity;
pub mod comment;
pub mod pagination;
pub mod post;
pub mod todo;
pub mod user;

use validator::ValidationError;

/// `validator` rule: rejects strings that are empty once trimmed.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}
