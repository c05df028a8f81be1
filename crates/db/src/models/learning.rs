//! Per-user learning state for dictionary items: mastery, dictionary
//! roll-ups and the quiz answer log.

use lisan_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `user_item_progress`, unique per (user, item).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ItemProgress {
    pub id: DbId,
    pub user_id: DbId,
    pub dictionary_item_id: DbId,
    pub is_completed: bool,
    pub mastery_level: i32,
    pub streak_count: i32,
    pub last_reviewed_at: Option<Timestamp>,
    pub next_review_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Mastery fields written after a quiz answer.
#[derive(Debug, Clone, Copy)]
pub struct ItemReview {
    pub mastery_level: i32,
    pub streak_count: i32,
    pub next_review_at: Timestamp,
}

/// A row from `user_dictionary_progress`, unique per (user, dictionary).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DictionaryProgress {
    pub id: DbId,
    pub user_id: DbId,
    pub dictionary_id: DbId,
    pub completed_items: i32,
    pub total_items: i32,
    pub progress_percentage: i32,
    pub is_completed: bool,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Dictionary progress joined with the dictionary's summary.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DictionaryProgressWithDictionary {
    pub id: DbId,
    pub dictionary_id: DbId,
    pub completed_items: i32,
    pub total_items: i32,
    pub progress_percentage: i32,
    pub is_completed: bool,
    pub completed_at: Option<Timestamp>,
    pub updated_at: Timestamp,
    pub dictionary_title: String,
    pub dictionary_slug: String,
    pub dictionary_thumbnail_url: Option<String>,
}

/// Aggregates over a user's dictionary progress.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DictionaryProgressStats {
    pub total_dictionaries_completed: i64,
    pub total_items_learned: i64,
    /// Mean progress percentage over started dictionaries, rounded.
    pub average_progress: i64,
}

/// An item due for review, with the user's mastery if they have any.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DueItem {
    pub id: DbId,
    pub dictionary_id: DbId,
    pub word: String,
    pub definition: Option<String>,
    pub video_url: String,
    pub image_url: Option<String>,
    #[serde(rename = "type")]
    pub item_type: String,
    pub mastery_level: Option<i32>,
    pub next_review_at: Option<Timestamp>,
}

/// A row from `quiz_logs`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuizLog {
    pub id: DbId,
    pub user_id: DbId,
    pub dictionary_item_id: DbId,
    pub quiz_type: String,
    pub is_correct: bool,
    pub ai_confidence_score: Option<f64>,
    pub xp_earned: i32,
    pub created_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateQuizLog {
    pub user_id: DbId,
    pub dictionary_item_id: DbId,
    pub quiz_type: String,
    pub is_correct: bool,
    pub ai_confidence_score: Option<f64>,
    pub xp_earned: i32,
}

/// A row from `gesture_logs`: one recognizer attempt.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GestureLog {
    pub id: DbId,
    pub user_id: DbId,
    pub dictionary_item_id: Option<DbId>,
    pub detected_label: String,
    pub expected_label: Option<String>,
    pub accuracy_score: Option<f64>,
    pub device_info: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateGestureLog {
    pub user_id: DbId,
    pub dictionary_item_id: Option<DbId>,
    pub detected_label: String,
    pub expected_label: Option<String>,
    pub accuracy_score: Option<f64>,
    pub device_info: Option<String>,
}
