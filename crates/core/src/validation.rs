//! Small input validators shared by the content and admin modules.

use crate::error::CoreError;

/// Validate that `value` is one of `allowed`.
pub fn validate_choice(field: &str, value: &str, allowed: &[&str]) -> Result<(), CoreError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {field} '{value}'. Must be one of: {}",
            allowed.join(", ")
        )))
    }
}

/// Validate that a required text field is present and not blank.
///
/// Returns the trimmed value on success.
pub fn require_text<'a>(field: &str, value: &'a str) -> Result<&'a str, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(trimmed)
}

/// Validate that an optional text field, when present, is not blank.
pub fn reject_blank(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    match value {
        Some(v) if v.trim().is_empty() => {
            Err(CoreError::Validation(format!("{field} must not be empty")))
        }
        _ => Ok(()),
    }
}

/// Validate that a numeric field is not negative.
pub fn require_non_negative(field: &str, value: i64) -> Result<(), CoreError> {
    if value < 0 {
        return Err(CoreError::Validation(format!(
            "{field} must not be negative (got {value})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_accepts_member() {
        assert!(validate_choice("level", "beginner", &["beginner", "advanced"]).is_ok());
    }

    #[test]
    fn choice_rejects_non_member_and_lists_options() {
        let err = validate_choice("level", "expert", &["beginner", "advanced"]).unwrap_err();
        assert!(err.to_string().contains("beginner, advanced"));
    }

    #[test]
    fn require_text_trims() {
        assert_eq!(require_text("title", "  Hello ").unwrap(), "Hello");
        assert!(require_text("title", "   ").is_err());
    }

    #[test]
    fn reject_blank_allows_absent() {
        assert!(reject_blank("title", None).is_ok());
        assert!(reject_blank("title", Some("x")).is_ok());
        assert!(reject_blank("title", Some(" ")).is_err());
    }

    #[test]
    fn non_negative() {
        assert!(require_non_negative("price", 0).is_ok());
        assert!(require_non_negative("price", -1).is_err());
    }
}
