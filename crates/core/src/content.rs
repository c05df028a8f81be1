//! Learning-content vocabularies: course levels, lesson types, dictionary
//! statuses and item types.

use crate::error::CoreError;
use crate::validation::validate_choice;

// ---------------------------------------------------------------------------
// Courses and dictionaries
// ---------------------------------------------------------------------------

/// Difficulty tiers shared by courses and dictionaries.
pub const VALID_DIFFICULTIES: &[&str] = &["beginner", "intermediate", "advanced"];
pub const DEFAULT_DIFFICULTY: &str = "beginner";

pub fn validate_difficulty(level: &str) -> Result<(), CoreError> {
    validate_choice("level", level, VALID_DIFFICULTIES)
}

pub const DICTIONARY_DRAFT: &str = "draft";
pub const DICTIONARY_PUBLISHED: &str = "published";
pub const DICTIONARY_ARCHIVED: &str = "archived";

pub const VALID_DICTIONARY_STATUSES: &[&str] =
    &[DICTIONARY_DRAFT, DICTIONARY_PUBLISHED, DICTIONARY_ARCHIVED];

pub fn validate_dictionary_status(status: &str) -> Result<(), CoreError> {
    validate_choice("dictionary status", status, VALID_DICTIONARY_STATUSES)
}

pub const VALID_ITEM_TYPES: &[&str] = &["word", "phrase", "number", "alphabet"];
pub const DEFAULT_ITEM_TYPE: &str = "word";

pub fn validate_item_type(item_type: &str) -> Result<(), CoreError> {
    validate_choice("item type", item_type, VALID_ITEM_TYPES)
}

// ---------------------------------------------------------------------------
// Lessons
// ---------------------------------------------------------------------------

pub const LESSON_VIDEO: &str = "video";
pub const LESSON_TEXT: &str = "text";
pub const LESSON_CAMERA_PRACTICE: &str = "camera_practice";

pub const VALID_LESSON_TYPES: &[&str] = &[LESSON_VIDEO, LESSON_TEXT, LESSON_CAMERA_PRACTICE];

/// XP granted for a lesson when none is configured.
pub const DEFAULT_LESSON_XP: i32 = 100;

/// Validate a lesson type and return the gesture to store.
///
/// Camera-practice lessons require a non-blank `target_gesture`; every other
/// type stores `NULL` regardless of input.
pub fn resolve_target_gesture(
    lesson_type: &str,
    target_gesture: Option<&str>,
) -> Result<Option<String>, CoreError> {
    validate_choice("lesson type", lesson_type, VALID_LESSON_TYPES)?;
    if lesson_type != LESSON_CAMERA_PRACTICE {
        return Ok(None);
    }
    match target_gesture.map(str::trim) {
        Some(g) if !g.is_empty() => Ok(Some(g.to_string())),
        _ => Err(CoreError::Validation(
            "target_gesture is required for camera_practice lessons".into(),
        )),
    }
}

// ---------------------------------------------------------------------------
// Quizzes
// ---------------------------------------------------------------------------

/// Validate a multiple-choice question: at least two distinct non-blank
/// options, and the correct answer must be one of them.
pub fn validate_quiz_options(options: &[String], correct_answer: &str) -> Result<(), CoreError> {
    if options.len() < 2 {
        return Err(CoreError::Validation(
            "A quiz question needs at least two options".into(),
        ));
    }
    if options.iter().any(|o| o.trim().is_empty()) {
        return Err(CoreError::Validation("Quiz options must not be blank".into()));
    }
    if !options.iter().any(|o| o == correct_answer) {
        return Err(CoreError::Validation(
            "correct_answer must be one of the options".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_practice_requires_gesture() {
        assert!(resolve_target_gesture("camera_practice", None).is_err());
        assert!(resolve_target_gesture("camera_practice", Some("  ")).is_err());
        assert_eq!(
            resolve_target_gesture("camera_practice", Some(" A ")).unwrap(),
            Some("A".to_string())
        );
    }

    #[test]
    fn other_lessons_drop_gesture() {
        assert_eq!(resolve_target_gesture("video", Some("A")).unwrap(), None);
        assert_eq!(resolve_target_gesture("text", None).unwrap(), None);
    }

    #[test]
    fn unknown_lesson_type() {
        assert!(resolve_target_gesture("quiz", None).is_err());
    }

    #[test]
    fn vocabularies() {
        assert!(validate_difficulty("advanced").is_ok());
        assert!(validate_difficulty("expert").is_err());
        assert!(validate_dictionary_status("archived").is_ok());
        assert!(validate_dictionary_status("deleted").is_err());
        assert!(validate_item_type("alphabet").is_ok());
        assert!(validate_item_type("sentence").is_err());
    }

    #[test]
    fn quiz_options() {
        let opts = vec!["A".to_string(), "B".to_string()];
        assert!(validate_quiz_options(&opts, "A").is_ok());
        assert!(validate_quiz_options(&opts, "C").is_err());
        assert!(validate_quiz_options(&opts[..1], "A").is_err());
    }
}
