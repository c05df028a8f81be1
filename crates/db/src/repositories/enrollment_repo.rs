//! Repository for the `enrollments` table.

use lisan_core::pagination::PageRequest;
use lisan_core::progress::{CompletedAtChange, EnrollmentPatch, ENROLLMENT_ACTIVE};
use lisan_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::enrollment::{
    CourseEnrollmentStat, Enrollment, EnrollmentFilter, EnrollmentWithCourse, UserEnrollmentStat,
};

const COLUMNS: &str = "id, user_id, course_id, status, progress_percentage, used_key, \
                       enrolled_at, completed_at, created_at, updated_at";

const FILTER_CLAUSE: &str = "($1::TEXT IS NULL OR status = $1)
       AND ($2::BIGINT IS NULL OR user_id = $2)
       AND ($3::BIGINT IS NULL OR course_id = $3)
       AND ($4::TEXT IS NULL OR used_key ILIKE $4)";

/// Provides CRUD operations for course enrollments.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        course_id: DbId,
        used_key: Option<&str>,
    ) -> Result<Enrollment, sqlx::Error> {
        let query = format!(
            "INSERT INTO enrollments (user_id, course_id, used_key)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(user_id)
            .bind(course_id)
            .bind(used_key)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM enrollments WHERE id = $1");
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_user_course<'e, E>(
        executor: E,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<Option<Enrollment>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query =
            format!("SELECT {COLUMNS} FROM enrollments WHERE user_id = $1 AND course_id = $2");
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(user_id)
            .bind(course_id)
            .fetch_optional(executor)
            .await
    }

    /// Admin listing, newest enrollment first.
    pub async fn list(
        pool: &PgPool,
        filter: &EnrollmentFilter,
        page: &PageRequest,
    ) -> Result<Vec<Enrollment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM enrollments
             WHERE {FILTER_CLAUSE}
             ORDER BY enrolled_at DESC, id DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(&filter.status)
            .bind(filter.user_id)
            .bind(filter.course_id)
            .bind(&filter.search)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &EnrollmentFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*)::BIGINT FROM enrollments WHERE {FILTER_CLAUSE}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(&filter.status)
            .bind(filter.user_id)
            .bind(filter.course_id)
            .bind(&filter.search)
            .fetch_one(pool)
            .await
    }

    /// A user's enrollments with a course summary, optionally filtered by
    /// status.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        status: Option<&str>,
    ) -> Result<Vec<EnrollmentWithCourse>, sqlx::Error> {
        sqlx::query_as::<_, EnrollmentWithCourse>(
            "SELECT e.id, e.user_id, e.course_id, e.status, e.progress_percentage, e.used_key,
                    e.enrolled_at, e.completed_at,
                    c.title AS course_title, c.slug AS course_slug,
                    c.thumbnail_url AS course_thumbnail_url, c.level AS course_level
             FROM enrollments e
             JOIN courses c ON c.id = e.course_id
             WHERE e.user_id = $1 AND ($2::TEXT IS NULL OR e.status = $2)
             ORDER BY e.enrolled_at DESC, e.id DESC",
        )
        .bind(user_id)
        .bind(status)
        .fetch_all(pool)
        .await
    }

    /// Apply a normalized admin patch.
    pub async fn apply_patch(
        pool: &PgPool,
        id: DbId,
        patch: &EnrollmentPatch,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let completed_at = match patch.completed_at {
            CompletedAtChange::Keep => "completed_at",
            CompletedAtChange::Stamp => "COALESCE(completed_at, NOW())",
            CompletedAtChange::Clear => "NULL",
        };
        let query = format!(
            "UPDATE enrollments SET
                status = COALESCE($2, status),
                progress_percentage = COALESCE($3, progress_percentage),
                completed_at = {completed_at}
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .bind(&patch.status)
            .bind(patch.progress_percentage)
            .fetch_optional(pool)
            .await
    }

    /// Write the rolled-up course progress for a user.
    ///
    /// Creates the enrollment if the user has none. `completed_at` is
    /// stamped the first time the status becomes `completed` and cleared
    /// when it falls back to `active`.
    pub async fn upsert_rollup<'e, E>(
        executor: E,
        user_id: DbId,
        course_id: DbId,
        progress_percentage: i32,
        status: &str,
    ) -> Result<Enrollment, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO enrollments (user_id, course_id, status, progress_percentage, completed_at)
             VALUES ($1, $2, $4, $3, CASE WHEN $4 = 'completed' THEN NOW() END)
             ON CONFLICT ON CONSTRAINT uq_enrollments_user_course DO UPDATE SET
                progress_percentage = EXCLUDED.progress_percentage,
                status = EXCLUDED.status,
                completed_at = CASE
                    WHEN EXCLUDED.status = 'completed'
                        THEN COALESCE(enrollments.completed_at, NOW())
                    ELSE NULL
                END
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(user_id)
            .bind(course_id)
            .bind(progress_percentage)
            .bind(status)
            .fetch_one(executor)
            .await
    }

    /// Reset a user's enrollment in a course to 0% active.
    pub async fn reset_progress<'e, E>(
        executor: E,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<Option<Enrollment>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE enrollments SET progress_percentage = 0, status = $3, completed_at = NULL
             WHERE user_id = $1 AND course_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(user_id)
            .bind(course_id)
            .bind(ENROLLMENT_ACTIVE)
            .fetch_optional(executor)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM enrollments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Enrolled users per course, most popular first.
    pub async fn course_stats(pool: &PgPool) -> Result<Vec<CourseEnrollmentStat>, sqlx::Error> {
        sqlx::query_as::<_, CourseEnrollmentStat>(
            "SELECT c.id AS course_id, c.title, COUNT(e.id)::BIGINT AS total_users
             FROM courses c
             LEFT JOIN enrollments e ON e.course_id = c.id
             GROUP BY c.id, c.title
             ORDER BY total_users DESC, c.id ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Enrollment counts per user split by status.
    pub async fn user_stats(pool: &PgPool) -> Result<Vec<UserEnrollmentStat>, sqlx::Error> {
        sqlx::query_as::<_, UserEnrollmentStat>(
            "SELECT u.id AS user_id, u.username,
                    COUNT(e.id)::BIGINT AS total,
                    COUNT(e.id) FILTER (WHERE e.status = 'active')::BIGINT AS active,
                    COUNT(e.id) FILTER (WHERE e.status = 'completed')::BIGINT AS completed,
                    COUNT(e.id) FILTER (WHERE e.status = 'dropped')::BIGINT AS dropped
             FROM users u
             JOIN enrollments e ON e.user_id = u.id
             GROUP BY u.id, u.username
             ORDER BY total DESC, u.id ASC",
        )
        .fetch_all(pool)
        .await
    }
}
