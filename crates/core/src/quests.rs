//! Daily quest vocabulary and progress arithmetic.

use crate::error::CoreError;
use crate::validation::validate_choice;

pub const ACTION_COMPLETE_LESSON: &str = "complete_lesson";
pub const ACTION_SUBMIT_QUIZ: &str = "submit_quiz";
pub const ACTION_STREAK_HIT: &str = "streak_hit";

pub const VALID_ACTIONS: &[&str] = &[ACTION_COMPLETE_LESSON, ACTION_SUBMIT_QUIZ, ACTION_STREAK_HIT];

pub fn validate_action(action: &str) -> Result<(), CoreError> {
    validate_choice("quest action", action, VALID_ACTIONS)
}

/// Progress after one more matching action. Never exceeds `target`.
pub fn advance_progress(progress: i32, target: i32) -> (i32, bool) {
    let next = progress.saturating_add(1).min(target);
    (next, next >= target)
}

/// Why a quest reward cannot be claimed, if it cannot.
pub fn claim_blocker(is_completed: bool, is_claimed: bool) -> Option<&'static str> {
    if !is_completed {
        Some("Quest is not completed yet")
    } else if is_claimed {
        Some("Quest reward already claimed")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_caps_at_target() {
        assert_eq!(advance_progress(0, 3), (1, false));
        assert_eq!(advance_progress(2, 3), (3, true));
        assert_eq!(advance_progress(3, 3), (3, true));
    }

    #[test]
    fn claim_rules() {
        assert!(claim_blocker(false, false).is_some());
        assert!(claim_blocker(true, true).is_some());
        assert!(claim_blocker(true, false).is_none());
    }

    #[test]
    fn actions() {
        assert!(validate_action("submit_quiz").is_ok());
        assert!(validate_action("login").is_err());
    }
}
