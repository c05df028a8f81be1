//! Daily activity streak state machine.
//!
//! Streaks are compared on calendar dates, never on elapsed wall-clock time,
//! so an activity at 23:59 followed by one at 00:01 counts as consecutive.

use serde::Serialize;

use crate::types::Date;

/// Stored streak counters for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakState {
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_activity_date: Option<Date>,
    pub freeze_count: i32,
}

impl StreakState {
    /// State of a user who has never been active.
    pub fn empty() -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            last_activity_date: None,
            freeze_count: 0,
        }
    }
}

/// What a streak hit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakTransition {
    /// First recorded activity.
    Started,
    /// Already active today; nothing changed.
    AlreadyCounted,
    /// Consecutive day; streak incremented.
    Extended,
    /// Gap forgiven by spending one freeze; streak unchanged.
    FreezeConsumed,
    /// Gap without a freeze; streak restarted at 1.
    Reset,
}

impl StreakTransition {
    /// Whether the hit changed any stored value.
    pub fn is_write(self) -> bool {
        !matches!(self, StreakTransition::AlreadyCounted)
    }
}

/// Apply an activity on `today` to `state`.
///
/// A `last_activity_date` in the future (clock skew) is treated like
/// same-day activity.
pub fn advance_streak(state: StreakState, today: Date) -> (StreakState, StreakTransition) {
    let Some(last) = state.last_activity_date else {
        let next = StreakState {
            current_streak: 1,
            longest_streak: state.longest_streak.max(1),
            last_activity_date: Some(today),
            freeze_count: state.freeze_count,
        };
        return (next, StreakTransition::Started);
    };

    let diff = (today - last).num_days();
    if diff <= 0 {
        return (state, StreakTransition::AlreadyCounted);
    }

    let (next, transition) = if diff == 1 {
        let current = state.current_streak.saturating_add(1);
        (
            StreakState {
                current_streak: current,
                last_activity_date: Some(today),
                ..state
            },
            StreakTransition::Extended,
        )
    } else if state.freeze_count > 0 {
        (
            StreakState {
                freeze_count: state.freeze_count - 1,
                last_activity_date: Some(today),
                ..state
            },
            StreakTransition::FreezeConsumed,
        )
    } else {
        (
            StreakState {
                current_streak: 1,
                last_activity_date: Some(today),
                ..state
            },
            StreakTransition::Reset,
        )
    };

    let longest = next.longest_streak.max(next.current_streak);
    (
        StreakState {
            longest_streak: longest,
            ..next
        },
        transition,
    )
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    use super::*;

    fn day(d: u32) -> Date {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    #[test]
    fn first_activity_starts_streak() {
        let (state, t) = advance_streak(StreakState::empty(), day(1));
        assert_matches!(t, StreakTransition::Started);
        assert_eq!(state.current_streak, 1);
        assert_eq!(state.longest_streak, 1);
        assert_eq!(state.last_activity_date, Some(day(1)));
    }

    #[test]
    fn same_day_is_idempotent() {
        let (state, _) = advance_streak(StreakState::empty(), day(1));
        let (again, t) = advance_streak(state, day(1));
        assert_matches!(t, StreakTransition::AlreadyCounted);
        assert!(!t.is_write());
        assert_eq!(again, state);
    }

    #[test]
    fn consecutive_day_extends() {
        let (state, _) = advance_streak(StreakState::empty(), day(1));
        let (state, t) = advance_streak(state, day(2));
        assert_matches!(t, StreakTransition::Extended);
        assert_eq!(state.current_streak, 2);
        assert_eq!(state.longest_streak, 2);
    }

    #[test]
    fn gap_without_freeze_resets() {
        let (state, _) = advance_streak(StreakState::empty(), day(1));
        let (state, _) = advance_streak(state, day(2));
        let (state, t) = advance_streak(state, day(4));
        assert_matches!(t, StreakTransition::Reset);
        assert_eq!(state.current_streak, 1);
        assert_eq!(state.longest_streak, 2, "longest survives a reset");
        assert_eq!(state.last_activity_date, Some(day(4)));
    }

    #[test]
    fn gap_with_freeze_consumes_it() {
        let start = StreakState {
            current_streak: 1,
            longest_streak: 1,
            last_activity_date: Some(day(1)),
            freeze_count: 1,
        };
        let (state, t) = advance_streak(start, day(4));
        assert_matches!(t, StreakTransition::FreezeConsumed);
        assert_eq!(state.current_streak, 1);
        assert_eq!(state.freeze_count, 0);
        assert_eq!(state.last_activity_date, Some(day(4)));
    }

    #[test]
    fn freeze_then_next_day_extends() {
        let start = StreakState {
            current_streak: 5,
            longest_streak: 5,
            last_activity_date: Some(day(1)),
            freeze_count: 2,
        };
        let (state, _) = advance_streak(start, day(5));
        let (state, t) = advance_streak(state, day(6));
        assert_matches!(t, StreakTransition::Extended);
        assert_eq!(state.current_streak, 6);
        assert_eq!(state.longest_streak, 6);
        assert_eq!(state.freeze_count, 1);
    }

    #[test]
    fn month_boundary_counts_as_consecutive() {
        let start = StreakState {
            current_streak: 3,
            longest_streak: 3,
            last_activity_date: NaiveDate::from_ymd_opt(2026, 1, 31),
            freeze_count: 0,
        };
        let (state, t) = advance_streak(start, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        assert_matches!(t, StreakTransition::Extended);
        assert_eq!(state.current_streak, 4);
    }

    #[test]
    fn date_granularity_ignores_time_of_day() {
        use chrono::{TimeZone, Utc};
        let late = Utc.with_ymd_and_hms(2026, 1, 1, 23, 59, 0).unwrap().date_naive();
        let early = Utc.with_ymd_and_hms(2026, 1, 2, 0, 1, 0).unwrap().date_naive();
        let (state, _) = advance_streak(StreakState::empty(), late);
        let (state, t) = advance_streak(state, early);
        assert_matches!(t, StreakTransition::Extended);
        assert_eq!(state.current_streak, 2);
    }

    #[test]
    fn future_last_activity_is_noop() {
        let start = StreakState {
            current_streak: 2,
            longest_streak: 2,
            last_activity_date: Some(day(10)),
            freeze_count: 0,
        };
        let (state, t) = advance_streak(start, day(9));
        assert_matches!(t, StreakTransition::AlreadyCounted);
        assert_eq!(state, start);
    }
}
