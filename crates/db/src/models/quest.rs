//! Daily quests and their per-user assignments.

use lisan_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `daily_quests`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DailyQuest {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub action_type: String,
    pub target_count: i32,
    pub xp_reward: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateDailyQuest {
    pub title: String,
    pub description: Option<String>,
    pub action_type: String,
    pub target_count: i32,
    pub xp_reward: i32,
}

/// A `user_quests` row joined with its quest definition.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserQuestDetail {
    pub id: DbId,
    pub user_id: DbId,
    pub quest_id: DbId,
    pub assigned_date: Date,
    pub progress_count: i32,
    pub is_completed: bool,
    pub is_claimed: bool,
    pub title: String,
    pub description: Option<String>,
    pub action_type: String,
    pub target_count: i32,
    pub xp_reward: i32,
}
