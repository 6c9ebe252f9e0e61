use crate::error::DomainError;

/// Reject a required text field that is empty once surrounding whitespace is
/// ignored. The value itself is stored as given.
pub fn require_text(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation {
            field,
            message: format!("{field} must not be empty"),
        });
    }
    Ok(())
}
