//! Course module (chapter) model and DTOs.

use lisan_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `modules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseModule {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub order_index: i32,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateCourseModule {
    pub course_id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub order_index: i32,
    pub is_published: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCourseModule {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub order_index: Option<i32>,
    pub is_published: Option<bool>,
}
