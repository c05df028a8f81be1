//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role`.

use crate::error::CoreError;

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";

pub const VALID_ROLES: &[&str] = &[ROLE_USER, ROLE_ADMIN];

/// Validate that a role name is one of the known roles.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    crate::validation::validate_choice("role", role, VALID_ROLES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_pass() {
        assert!(validate_role(ROLE_USER).is_ok());
        assert!(validate_role(ROLE_ADMIN).is_ok());
    }

    #[test]
    fn unknown_role_fails() {
        assert!(validate_role("creator").is_err());
        assert!(validate_role("").is_err());
    }
}
