//! Completion roll-up rules: lesson -> module -> course, item -> dictionary.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Enrollment status
// ---------------------------------------------------------------------------

pub const ENROLLMENT_ACTIVE: &str = "active";
pub const ENROLLMENT_COMPLETED: &str = "completed";
pub const ENROLLMENT_DROPPED: &str = "dropped";

pub const VALID_ENROLLMENT_STATUSES: &[&str] =
    &[ENROLLMENT_ACTIVE, ENROLLMENT_COMPLETED, ENROLLMENT_DROPPED];

pub fn validate_enrollment_status(status: &str) -> Result<(), CoreError> {
    crate::validation::validate_choice("enrollment status", status, VALID_ENROLLMENT_STATUSES)
}

// ---------------------------------------------------------------------------
// Roll-up arithmetic
// ---------------------------------------------------------------------------

/// A module is complete iff it has published lessons and the user finished
/// every one of them. A module without published lessons is never complete.
pub fn module_is_complete(published_lessons: i64, completed_lessons: i64) -> bool {
    published_lessons > 0 && completed_lessons >= published_lessons
}

/// `round(100 * completed / total)`, clamped to `0..=100`. Zero when `total`
/// is zero.
///
/// A nearly finished set can round up to 100; use [`course_status`] rather
/// than the percentage to decide completion.
pub fn completion_percentage(completed: i64, total: i64) -> i32 {
    if total <= 0 {
        return 0;
    }
    let completed = completed.clamp(0, total);
    (completed as f64 * 100.0 / total as f64).round() as i32
}

/// Enrollment status implied by lesson counts: completed iff there is at
/// least one published lesson and every one of them is done.
pub fn course_status(completed: i64, total: i64) -> &'static str {
    if total > 0 && completed >= total {
        ENROLLMENT_COMPLETED
    } else {
        ENROLLMENT_ACTIVE
    }
}

// ---------------------------------------------------------------------------
// Manual enrollment edits
// ---------------------------------------------------------------------------

/// What to do with `enrollments.completed_at` on an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletedAtChange {
    Keep,
    /// Set to now unless already set.
    Stamp,
    Clear,
}

/// Normalized admin edit of an enrollment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentPatch {
    pub status: Option<String>,
    pub progress_percentage: Option<i32>,
    pub completed_at: CompletedAtChange,
}

/// Couple status and percentage the way admins expect:
///
/// - `completed` forces 100% and stamps `completed_at`;
/// - `active` clears `completed_at`;
/// - 100% without an explicit status implies `completed`.
pub fn resolve_enrollment_patch(
    status: Option<&str>,
    progress_percentage: Option<i32>,
) -> Result<EnrollmentPatch, CoreError> {
    if status.is_none() && progress_percentage.is_none() {
        return Err(CoreError::Validation(
            "Provide status or progress_percentage".into(),
        ));
    }
    if let Some(s) = status {
        validate_enrollment_status(s)?;
    }
    if let Some(p) = progress_percentage {
        if !(0..=100).contains(&p) {
            return Err(CoreError::Validation(format!(
                "progress_percentage must be between 0 and 100 (got {p})"
            )));
        }
    }

    let patch = match status {
        Some(ENROLLMENT_COMPLETED) => EnrollmentPatch {
            status: Some(ENROLLMENT_COMPLETED.to_string()),
            progress_percentage: Some(100),
            completed_at: CompletedAtChange::Stamp,
        },
        Some(ENROLLMENT_ACTIVE) => EnrollmentPatch {
            status: Some(ENROLLMENT_ACTIVE.to_string()),
            progress_percentage,
            completed_at: CompletedAtChange::Clear,
        },
        Some(other) => EnrollmentPatch {
            status: Some(other.to_string()),
            progress_percentage,
            completed_at: CompletedAtChange::Keep,
        },
        None if progress_percentage == Some(100) => EnrollmentPatch {
            status: Some(ENROLLMENT_COMPLETED.to_string()),
            progress_percentage,
            completed_at: CompletedAtChange::Stamp,
        },
        None => EnrollmentPatch {
            status: None,
            progress_percentage,
            completed_at: CompletedAtChange::Keep,
        },
    };
    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_module_is_never_complete() {
        assert!(!module_is_complete(0, 0));
        assert!(!module_is_complete(0, 3));
    }

    #[test]
    fn module_complete_when_all_published_done() {
        assert!(module_is_complete(3, 3));
        assert!(!module_is_complete(3, 2));
    }

    #[test]
    fn percentage_rounds() {
        assert_eq!(completion_percentage(1, 3), 33);
        assert_eq!(completion_percentage(2, 3), 67);
        assert_eq!(completion_percentage(3, 3), 100);
        assert_eq!(completion_percentage(0, 0), 0);
    }

    #[test]
    fn percentage_may_round_up_to_100() {
        assert_eq!(completion_percentage(199, 200), 100);
        assert_eq!(completion_percentage(5, 4), 100);
        assert_eq!(completion_percentage(-1, 4), 0);
    }

    #[test]
    fn status_follows_counts_not_rounding() {
        assert_eq!(course_status(199, 200), ENROLLMENT_ACTIVE);
        assert_eq!(course_status(200, 200), ENROLLMENT_COMPLETED);
        assert_eq!(course_status(0, 0), ENROLLMENT_ACTIVE);
    }

    #[test]
    fn completed_status_forces_full_progress() {
        let patch = resolve_enrollment_patch(Some("completed"), Some(40)).unwrap();
        assert_eq!(patch.progress_percentage, Some(100));
        assert_eq!(patch.completed_at, CompletedAtChange::Stamp);
    }

    #[test]
    fn active_clears_completion() {
        let patch = resolve_enrollment_patch(Some("active"), None).unwrap();
        assert_eq!(patch.completed_at, CompletedAtChange::Clear);
        assert_eq!(patch.progress_percentage, None);
    }

    #[test]
    fn full_progress_implies_completed() {
        let patch = resolve_enrollment_patch(None, Some(100)).unwrap();
        assert_eq!(patch.status.as_deref(), Some("completed"));
        assert_eq!(patch.completed_at, CompletedAtChange::Stamp);
    }

    #[test]
    fn dropped_keeps_timestamp() {
        let patch = resolve_enrollment_patch(Some("dropped"), Some(30)).unwrap();
        assert_eq!(patch.completed_at, CompletedAtChange::Keep);
        assert_eq!(patch.progress_percentage, Some(30));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(resolve_enrollment_patch(None, None).is_err());
        assert!(resolve_enrollment_patch(Some("paused"), None).is_err());
        assert!(resolve_enrollment_patch(None, Some(101)).is_err());
    }
}
