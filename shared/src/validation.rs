//! Input validation functions
//!
//! Plain validators returning `Result<(), String>` so callers can map the
//! message into their own error type.

/// Maximum accepted username length
pub const MAX_USERNAME_LEN: usize = 32;

/// Maximum accepted email length
pub const MAX_EMAIL_LEN: usize = 255;

/// Validate username shape
///
/// Usernames are ASCII alphanumerics plus `-`, `_`, and `.`; uniqueness is
/// enforced separately by the store.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username cannot be empty".to_string());
    }
    if username.len() > MAX_USERNAME_LEN {
        return Err(format!(
            "Username must be at most {} characters",
            MAX_USERNAME_LEN
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err("Username contains invalid characters".to_string());
    }
    Ok(())
}

/// Validate email length bounds
///
/// Format checking is done with the `validator` crate at the service layer;
/// this only guards the obvious size cases shared with other consumers.
pub fn validate_email_length(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err("Email too long".to_string());
    }
    Ok(())
}

/// Validate password bounds
///
/// No minimum-strength policy is applied; the upper bound keeps hashing cost
/// bounded.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password cannot be empty".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("alice_a-1.b").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username(&"a".repeat(33)).is_err());
    }

    #[test]
    fn test_validate_email_length() {
        assert!(validate_email_length("a@x.com").is_ok());
        assert!(validate_email_length("").is_err());
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(validate_email_length(&long).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret").is_ok());
        assert!(validate_password("").is_err());
        assert!(validate_password(&"a".repeat(129)).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_alphanumeric_usernames_valid(name in "[a-zA-Z0-9]{1,32}") {
            prop_assert!(validate_username(&name).is_ok());
        }

        #[test]
        fn prop_overlong_usernames_invalid(name in "[a-z]{33,64}") {
            prop_assert!(validate_username(&name).is_err());
        }

        #[test]
        fn prop_password_length_bounds(len in 1usize..=128) {
            let password: String = (0..len).map(|_| 'a').collect();
            prop_assert!(validate_password(&password).is_ok());
        }
    }
}
