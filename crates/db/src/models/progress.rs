//! Lesson and module progress rows.

use lisan_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `lesson_progress`, unique per (user, lesson).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LessonProgress {
    pub id: DbId,
    pub user_id: DbId,
    pub lesson_id: DbId,
    pub is_completed: bool,
    pub last_position_seconds: i32,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Result of a lesson progress upsert: the new row and whether the call
/// flipped it from not-completed to completed.
#[derive(Debug, Clone)]
pub struct LessonUpsert {
    pub progress: LessonProgress,
    pub newly_completed: bool,
}

/// A row from `module_progress`, unique per (user, module).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ModuleProgress {
    pub id: DbId,
    pub user_id: DbId,
    pub module_id: DbId,
    pub is_completed: bool,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Published/completed lesson counts for one scope (module or course).
#[derive(Debug, Clone, Copy, FromRow)]
pub struct CompletionCounts {
    pub published: i64,
    pub completed: i64,
}
