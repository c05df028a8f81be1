//! Spaced-repetition bookkeeping for dictionary items.
//!
//! Each correct recall raises the mastery level (capped at [`MAX_MASTERY`])
//! and pushes the next review out by `2^mastery` days. An incorrect recall
//! lowers mastery (floored at 0), resets the answer streak and makes the item
//! due immediately.

use chrono::Duration;

use crate::types::Timestamp;

pub const MAX_MASTERY: i32 = 5;

/// Item state after a quiz answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MasteryUpdate {
    pub mastery_level: i32,
    pub streak_count: i32,
    pub next_review_at: Timestamp,
}

/// Days until the next review at a given mastery level.
pub fn review_interval_days(mastery_level: i32) -> i64 {
    1_i64 << mastery_level.clamp(0, MAX_MASTERY)
}

/// Apply a quiz answer to an item's mastery state.
pub fn apply_quiz_result(
    mastery_level: i32,
    streak_count: i32,
    is_correct: bool,
    now: Timestamp,
) -> MasteryUpdate {
    if is_correct {
        let mastery = (mastery_level + 1).min(MAX_MASTERY);
        MasteryUpdate {
            mastery_level: mastery,
            streak_count: streak_count.saturating_add(1),
            next_review_at: now + Duration::days(review_interval_days(mastery)),
        }
    } else {
        MasteryUpdate {
            mastery_level: (mastery_level - 1).max(0),
            streak_count: 0,
            next_review_at: now,
        }
    }
}
