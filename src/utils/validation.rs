//! Input validation helpers
//!
//! Request-shape checks performed before the core is entered; a rejection
//! here never touches the store.

use crate::utils::AppError;

/// Guest names (SQLite TEXT has no built-in length enforcement)
pub const MAX_NAME_LEN: usize = 200;

/// Upper bound for the `limit` query parameter
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}
