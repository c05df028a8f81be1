//! Repository for the `lessons` table.

use lisan_core::types::DbId;
use sqlx::PgPool;

use crate::models::lesson::{CreateLesson, Lesson, LessonScope, UpdateLesson};

const COLUMNS: &str = "id, module_id, title, slug, description, lesson_type, target_gesture, \
                       content_url, order_index, xp_reward, is_published, created_at, updated_at";

/// Provides CRUD operations for lessons.
pub struct LessonRepo;

impl LessonRepo {
    pub async fn create(pool: &PgPool, input: &CreateLesson) -> Result<Lesson, sqlx::Error> {
        let query = format!(
            "INSERT INTO lessons
                (module_id, title, slug, description, lesson_type, target_gesture,
                 content_url, order_index, xp_reward, is_published)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lesson>(&query)
            .bind(input.module_id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.lesson_type)
            .bind(&input.target_gesture)
            .bind(&input.content_url)
            .bind(input.order_index)
            .bind(input.xp_reward)
            .bind(input.is_published)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lesson>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lessons WHERE id = $1");
        sqlx::query_as::<_, Lesson>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Every lesson of a course (through its modules), ordered by the
    /// lesson's `order_index` within each module.
    pub async fn list_by_course(pool: &PgPool, course_id: DbId) -> Result<Vec<Lesson>, sqlx::Error> {
        let query = format!(
            "SELECT {cols} FROM lessons l
             JOIN modules m ON m.id = l.module_id
             WHERE m.course_id = $1
             ORDER BY l.order_index ASC, l.id ASC",
            cols = prefixed("l")
        );
        sqlx::query_as::<_, Lesson>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Resolve the module and course a lesson belongs to.
    pub async fn find_scope(
        pool: &PgPool,
        lesson_id: DbId,
    ) -> Result<Option<LessonScope>, sqlx::Error> {
        sqlx::query_as::<_, LessonScope>(
            "SELECT l.id AS lesson_id, l.module_id, m.course_id, l.xp_reward
             FROM lessons l
             JOIN modules m ON m.id = l.module_id
             WHERE l.id = $1",
        )
        .bind(lesson_id)
        .fetch_optional(pool)
        .await
    }

    /// Whether `slug` is taken within the module by a lesson other than
    /// `exclude_id`.
    pub async fn slug_exists(
        pool: &PgPool,
        module_id: DbId,
        slug: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM lessons
                WHERE module_id = $1 AND slug = $2 AND ($3::BIGINT IS NULL OR id <> $3)
             )",
        )
        .bind(module_id)
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// Partial update. `target_gesture` is overwritten (possibly with
    /// `NULL`) whenever `lesson_type` is supplied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLesson,
    ) -> Result<Option<Lesson>, sqlx::Error> {
        let query = format!(
            "UPDATE lessons SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                lesson_type = COALESCE($5, lesson_type),
                target_gesture = CASE WHEN $5::TEXT IS NULL THEN target_gesture ELSE $6 END,
                content_url = COALESCE($7, content_url),
                order_index = COALESCE($8, order_index),
                xp_reward = COALESCE($9, xp_reward),
                is_published = COALESCE($10, is_published)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lesson>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.lesson_type)
            .bind(&input.target_gesture)
            .bind(&input.content_url)
            .bind(input.order_index)
            .bind(input.xp_reward)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lessons WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn prefixed(alias: &str) -> String {
    COLUMNS
        .split(',')
        .map(|c| format!("{alias}.{}", c.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}
