//! Course entity model, DTOs and the nested course tree.

use lisan_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::course_module::CourseModule;
use super::lesson::Lesson;

/// A row from the `courses` table. `price` is in minor currency units.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub level: String,
    pub price: i64,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a course. The slug is derived by the caller.
#[derive(Debug, Deserialize)]
pub struct CreateCourse {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub level: String,
    pub price: i64,
    pub is_published: bool,
}

/// DTO for updating a course. `slug` is set whenever `title` changes.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCourse {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub level: Option<String>,
    pub price: Option<i64>,
    pub is_published: Option<bool>,
}

/// Filters for the course listing.
#[derive(Debug, Default)]
pub struct CourseFilter {
    pub search: Option<String>,
    pub level: Option<String>,
    pub is_published: Option<bool>,
}

/// A module with its lessons, ordered by `order_index`.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleWithLessons {
    #[serde(flatten)]
    pub module: CourseModule,
    pub lessons: Vec<Lesson>,
}

/// A course with its full module/lesson tree.
#[derive(Debug, Clone, Serialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: Course,
    pub modules: Vec<ModuleWithLessons>,
}
