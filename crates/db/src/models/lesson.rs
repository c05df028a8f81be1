//! Lesson model and DTOs.

use lisan_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `lessons` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lesson {
    pub id: DbId,
    pub module_id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub lesson_type: String,
    pub target_gesture: Option<String>,
    pub content_url: Option<String>,
    pub order_index: i32,
    pub xp_reward: i32,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateLesson {
    pub module_id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub lesson_type: String,
    pub target_gesture: Option<String>,
    pub content_url: Option<String>,
    pub order_index: i32,
    pub xp_reward: i32,
    pub is_published: bool,
}

/// Partial lesson update.
///
/// `target_gesture` is written as given (including `NULL`) whenever
/// `lesson_type` is present, because the two are validated together.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateLesson {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub lesson_type: Option<String>,
    pub target_gesture: Option<String>,
    pub content_url: Option<String>,
    pub order_index: Option<i32>,
    pub xp_reward: Option<i32>,
    pub is_published: Option<bool>,
}

/// The course/module a lesson hangs under, used to validate progress input.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct LessonScope {
    pub lesson_id: DbId,
    pub module_id: DbId,
    pub course_id: DbId,
    pub xp_reward: i32,
}
