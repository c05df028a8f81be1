//! Achievement catalog and per-user grants.

use lisan_core::achievements::CatalogEntry;
use lisan_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `achievements` catalog.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Achievement {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub category: String,
    #[serde(rename = "type")]
    pub achievement_type: String,
    pub target_value: i64,
    pub xp_reward: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Achievement {
    pub fn catalog_entry(&self) -> CatalogEntry {
        CatalogEntry {
            id: self.id,
            achievement_type: self.achievement_type.clone(),
            target_value: self.target_value,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateAchievement {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub category: String,
    pub achievement_type: String,
    pub target_value: i64,
    pub xp_reward: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateAchievement {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub category: Option<String>,
    pub achievement_type: Option<String>,
    pub target_value: Option<i64>,
    pub xp_reward: Option<i32>,
}

/// A row from `user_achievements`, unique per (user, achievement).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserAchievement {
    pub id: DbId,
    pub user_id: DbId,
    pub achievement_id: DbId,
    pub unlocked_at: Timestamp,
}

/// A grant joined with its catalog entry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserAchievementDetail {
    pub id: DbId,
    pub user_id: DbId,
    pub achievement_id: DbId,
    pub unlocked_at: Timestamp,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub category: String,
    pub xp_reward: i32,
}
