//! Daily activity streak rows.

use lisan_core::streak::StreakState;
use lisan_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `user_streaks`, unique per user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserStreak {
    pub id: DbId,
    pub user_id: DbId,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_activity_date: Option<Date>,
    pub freeze_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserStreak {
    /// The counters as the pure streak state machine sees them.
    pub fn state(&self) -> StreakState {
        StreakState {
            current_streak: self.current_streak,
            longest_streak: self.longest_streak,
            last_activity_date: self.last_activity_date,
            freeze_count: self.freeze_count,
        }
    }
}

/// Streak row joined with the owner's username, for admin listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StreakWithUser {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_activity_date: Option<Date>,
    pub freeze_count: i32,
    pub updated_at: Timestamp,
}

/// Admin correction of a streak row.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStreak {
    pub current_streak: Option<i32>,
    pub longest_streak: Option<i32>,
    pub freeze_count: Option<i32>,
}
