//! Repository for the `modules` table.

use lisan_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::course_module::{CourseModule, CreateCourseModule, UpdateCourseModule};

const COLUMNS: &str = "id, course_id, title, slug, description, thumbnail_url, order_index, \
                       is_published, created_at, updated_at";

/// Provides CRUD operations for course modules.
pub struct ModuleRepo;

impl ModuleRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateCourseModule,
    ) -> Result<CourseModule, sqlx::Error> {
        let query = format!(
            "INSERT INTO modules
                (course_id, title, slug, description, thumbnail_url, order_index, is_published)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CourseModule>(&query)
            .bind(input.course_id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.thumbnail_url)
            .bind(input.order_index)
            .bind(input.is_published)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CourseModule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM modules WHERE id = $1");
        sqlx::query_as::<_, CourseModule>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All modules of a course ordered by `order_index`.
    pub async fn list_by_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<CourseModule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM modules WHERE course_id = $1 ORDER BY order_index ASC, id ASC"
        );
        sqlx::query_as::<_, CourseModule>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// IDs of a course's modules, for roll-up recomputation.
    pub async fn ids_by_course<'e, E>(executor: E, course_id: DbId) -> Result<Vec<DbId>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM modules WHERE course_id = $1 ORDER BY order_index ASC, id ASC",
        )
        .bind(course_id)
        .fetch_all(executor)
        .await
    }

    /// Whether `slug` is taken within the course by a module other than
    /// `exclude_id`.
    pub async fn slug_exists(
        pool: &PgPool,
        course_id: DbId,
        slug: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM modules
                WHERE course_id = $1 AND slug = $2 AND ($3::BIGINT IS NULL OR id <> $3)
             )",
        )
        .bind(course_id)
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCourseModule,
    ) -> Result<Option<CourseModule>, sqlx::Error> {
        let query = format!(
            "UPDATE modules SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                thumbnail_url = COALESCE($5, thumbnail_url),
                order_index = COALESCE($6, order_index),
                is_published = COALESCE($7, is_published)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CourseModule>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.thumbnail_url)
            .bind(input.order_index)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM modules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
