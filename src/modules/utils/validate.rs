/// Helper function to validate email format
pub fn is_valid_email(email: &str) -> bool {
    // Basic shape check, not a full RFC parse
    email.contains('@')
        && email.contains('.')
        && !email.contains(' ')
        && email.chars().filter(|&c| c == '@').count() == 1
        && email.len() >= 5
}

/// Helper function to collect a "field is required" error for blank values.
/// Request structs run this per field instead of scattering null checks.
pub fn require_field(value: &str, field: &str, errors: &mut Vec<String>) {
    if value.trim().is_empty() {
        errors.push(format!("{} is required", field));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        // Valid emails
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("user.name@example.co.uk"));
        assert!(is_valid_email("user+tag@example.com"));

        // Invalid emails
        assert!(!is_valid_email("user@example")); // Missing TLD
        assert!(!is_valid_email("user example.com")); // Contains space
        assert!(!is_valid_email("user")); // No @ symbol
        assert!(!is_valid_email("")); // Empty string
        assert!(!is_valid_email("user@@example.com")); // Multiple @ symbols
    }

    #[test]
    fn test_required_fields() {
        let mut errors = Vec::new();
        require_field("value", "username", &mut errors);
        assert!(errors.is_empty());

        require_field("", "username", &mut errors);
        require_field("   ", "department", &mut errors);
        assert_eq!(
            errors,
            vec![
                "username is required".to_string(),
                "department is required".to_string()
            ]
        );
    }
}
