//! Account input rules and email verification codes.

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::error::CoreError;

/// Minimum password length for self-registration and admin-created users.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Verification codes expire this many hours after issue.
pub const VERIFICATION_CODE_TTL_HOURS: i64 = 24;

/// Token type stored in `verification_tokens.token_type`.
pub const TOKEN_TYPE_VERIFICATION: &str = "verification";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
});

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.]{3,30}$").expect("valid regex"));

/// Normalize and validate an email address (trimmed, lowercased).
pub fn normalize_email(email: &str) -> Result<String, CoreError> {
    let email = email.trim().to_lowercase();
    if !EMAIL_RE.is_match(&email) {
        return Err(CoreError::Validation(format!(
            "Invalid email address '{email}'"
        )));
    }
    Ok(email)
}

/// Validate a username: 3-30 characters of letters, digits, `_` or `.`.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    if !USERNAME_RE.is_match(username) {
        return Err(CoreError::Validation(
            "Username must be 3-30 characters of letters, digits, '_' or '.'".into(),
        ));
    }
    Ok(())
}

/// Validate minimum password length.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

/// Whether a login identifier should be matched against the email column.
pub fn is_email_identifier(identifier: &str) -> bool {
    identifier.contains('@')
}

/// Generate a 6-digit numeric verification code.
pub fn generate_verification_code() -> String {
    rand::rng().random_range(100_000..1_000_000).to_string()
}

/// SHA-256 hex digest of a verification code. Only the digest is stored.
pub fn hash_verification_code(code: &str) -> String {
    format!("{:x}", Sha256::digest(code.trim().as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_normalization() {
        assert_eq!(normalize_email("  Ana@Example.COM ").unwrap(), "ana@example.com");
        assert!(normalize_email("not-an-email").is_err());
        assert!(normalize_email("a@b").is_err());
    }

    #[test]
    fn usernames() {
        assert!(validate_username("ana_01").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
    }

    #[test]
    fn passwords() {
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn identifiers() {
        assert!(is_email_identifier("ana@example.com"));
        assert!(!is_email_identifier("ana"));
    }

    #[test]
    fn codes_are_six_digits() {
        for _ in 0..200 {
            let code = generate_verification_code();
            assert_eq!(code.len(), 6);
            let n: u32 = code.parse().unwrap();
            assert!((100_000..1_000_000).contains(&n));
        }
    }

    #[test]
    fn code_hash_is_stable_and_trimmed() {
        let a = hash_verification_code("123456");
        assert_eq!(a, hash_verification_code(" 123456 "));
        assert_eq!(a.len(), 64);
        assert_ne!(a, hash_verification_code("654321"));
    }
}
