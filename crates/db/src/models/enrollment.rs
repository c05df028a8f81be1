//! Course enrollment model, DTOs and reporting rows.

use lisan_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `enrollments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Enrollment {
    pub id: DbId,
    pub user_id: DbId,
    pub course_id: DbId,
    pub status: String,
    pub progress_percentage: i32,
    pub used_key: Option<String>,
    pub enrolled_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Enrollment joined with a summary of its course.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EnrollmentWithCourse {
    pub id: DbId,
    pub user_id: DbId,
    pub course_id: DbId,
    pub status: String,
    pub progress_percentage: i32,
    pub used_key: Option<String>,
    pub enrolled_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub course_title: String,
    pub course_slug: String,
    pub course_thumbnail_url: Option<String>,
    pub course_level: String,
}

/// Filters for the admin enrollment listing.
#[derive(Debug, Default)]
pub struct EnrollmentFilter {
    pub status: Option<String>,
    pub user_id: Option<DbId>,
    pub course_id: Option<DbId>,
    /// `ILIKE` pattern on `used_key`.
    pub search: Option<String>,
}

/// Number of enrolled users per course.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseEnrollmentStat {
    pub course_id: DbId,
    pub title: String,
    pub total_users: i64,
}

/// Enrollment counts per user, split by status.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserEnrollmentStat {
    pub user_id: DbId,
    pub username: String,
    pub total: i64,
    pub active: i64,
    pub completed: i64,
    pub dropped: i64,
}
