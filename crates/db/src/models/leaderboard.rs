//! Leaderboard read models.

use lisan_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A live leaderboard row straight from `users`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeaderboardUser {
    pub user_id: DbId,
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub xp: i64,
    pub total_xp: i64,
    pub level: i32,
}

/// A snapshot row from `leaderboards` joined with the user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PeriodicLeaderboardRow {
    pub user_id: DbId,
    pub username: String,
    pub avatar_url: Option<String>,
    pub period: String,
    pub xp_snapshot: i64,
    pub level_snapshot: i32,
    pub updated_at: Timestamp,
}

/// A streak leaderboard row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StreakLeaderboardRow {
    pub user_id: DbId,
    pub username: String,
    pub avatar_url: Option<String>,
    pub current_streak: i32,
    pub longest_streak: i32,
}

/// Which XP column the live leaderboard ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardMetric {
    Xp,
    TotalXp,
}

impl LeaderboardMetric {
    pub fn column(self) -> &'static str {
        match self {
            Self::Xp => "xp",
            Self::TotalXp => "total_xp",
        }
    }
}
