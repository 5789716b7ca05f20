//! # Validation Utilities
//!
//! Input validation helpers.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate email format.
///
/// Requires exactly one `@`, a non-empty local part, and a domain containing
/// a dot that neither starts nor ends the domain.
pub fn validate_email(email: &str) -> Result<(), String> {
    let invalid = || Err("Invalid email format".to_string());

    if email.chars().any(char::is_whitespace) {
        return invalid();
    }

    let Some((local, domain)) = email.split_once('@') else {
        return invalid();
    };

    if local.is_empty() || domain.contains('@') {
        return invalid();
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return invalid();
    }

    Ok(())
}

/// Validate that the character count of `value` lies within `min..=max`.
pub fn validate_length(value: &str, min: usize, max: usize, field_name: &str) -> Result<(), String> {
    let len = value.chars().count();
    if len < min {
        Err(format!("{} must be at least {} characters", field_name, min))
    } else if len > max {
        Err(format!("{} must be at most {} characters", field_name, max))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("admin@admin.com").is_ok());
        assert!(validate_email("user+tag@example.co.uk").is_ok());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("a@b@example.com").is_err());
        assert!(validate_email("user@localhost").is_err());
        assert!(validate_email("user@.com").is_err());
        assert!(validate_email("us er@example.com").is_err());
    }

    #[test]
    fn test_validate_length_bounds() {
        assert!(validate_length("abc", 3, 72, "Password").is_ok());
        assert_eq!(
            validate_length("ab", 3, 72, "Password"),
            Err("Password must be at least 3 characters".to_string())
        );
        let long = "x".repeat(73);
        assert_eq!(
            validate_length(&long, 3, 72, "Password"),
            Err("Password must be at most 72 characters".to_string())
        );
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("users", "Name").is_ok());
        assert_eq!(validate_not_empty("   ", "Name"), Err("Name cannot be empty".to_string()));
    }
}
