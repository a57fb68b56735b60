//! Input validation utilities.
//!
//! Centralized validation helpers used across API routes.

use validator::Validate;

use crate::error::AdminError;

/// Validate a request body, returning an AdminError::Validation on failure.
pub fn validate_request<T: Validate>(body: &T) -> Result<(), AdminError> {
    body.validate().map_err(|e| AdminError::Validation {
        message: format_validation_errors(e),
    })
}

/// Format validation errors into a human-readable string.
fn format_validation_errors(errors: validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for '{field}'"))
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate a username path parameter before it reaches a store lookup.
pub fn validate_username(username: &str) -> Result<(), AdminError> {
    if username.trim().is_empty() {
        return Err(AdminError::Validation {
            message: "Username cannot be empty or whitespace only".into(),
        });
    }

    let valid = username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.');

    if !valid {
        return Err(AdminError::Validation {
            message: "Username can only contain letters, numbers, hyphens, underscores, and dots"
                .into(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_username() {
        assert!(validate_username("").is_err());
        assert!(validate_username("   ").is_err());
    }

    #[test]
    fn rejects_path_traversal_characters() {
        assert!(validate_username("../etc/passwd").is_err());
        assert!(validate_username("lisa smith").is_err());
    }

    #[test]
    fn accepts_ordinary_usernames() {
        assert!(validate_username("lisa").is_ok());
        assert!(validate_username("to-do_99").is_ok());
    }
}
