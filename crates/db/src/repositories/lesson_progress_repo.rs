//! Repository for the `lesson_progress` table and the completion counts
//! that drive module and course roll-ups.

use lisan_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::progress::{CompletionCounts, LessonProgress, LessonUpsert};

const COLUMNS: &str = "id, user_id, lesson_id, is_completed, last_position_seconds, \
                       completed_at, created_at, updated_at";

pub struct LessonProgressRepo;

impl LessonProgressRepo {
    /// Record lesson progress and report whether this call completed the
    /// lesson for the first time.
    ///
    /// The row is created first and then locked, so two concurrent
    /// completions of the same lesson cannot both observe `false`. Call
    /// inside a transaction.
    pub async fn upsert(
        conn: &mut PgConnection,
        user_id: DbId,
        lesson_id: DbId,
        is_completed: bool,
        last_position_seconds: Option<i32>,
    ) -> Result<LessonUpsert, sqlx::Error> {
        sqlx::query(
            "INSERT INTO lesson_progress (user_id, lesson_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_lesson_progress_user_lesson DO NOTHING",
        )
        .bind(user_id)
        .bind(lesson_id)
        .execute(&mut *conn)
        .await?;

        let was_completed: bool = sqlx::query_scalar(
            "SELECT is_completed FROM lesson_progress
             WHERE user_id = $1 AND lesson_id = $2
             FOR UPDATE",
        )
        .bind(user_id)
        .bind(lesson_id)
        .fetch_one(&mut *conn)
        .await?;

        let query = format!(
            "UPDATE lesson_progress SET
                is_completed = $3,
                last_position_seconds = COALESCE($4, last_position_seconds),
                completed_at = CASE WHEN $3 THEN COALESCE(completed_at, NOW()) ELSE NULL END
             WHERE user_id = $1 AND lesson_id = $2
             RETURNING {COLUMNS}"
        );
        let progress = sqlx::query_as::<_, LessonProgress>(&query)
            .bind(user_id)
            .bind(lesson_id)
            .bind(is_completed)
            .bind(last_position_seconds)
            .fetch_one(&mut *conn)
            .await?;

        Ok(LessonUpsert {
            progress,
            newly_completed: !was_completed && is_completed,
        })
    }

    /// A user's progress rows for every lesson of a course.
    pub async fn list_for_course(
        pool: &PgPool,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<Vec<LessonProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {cols} FROM lesson_progress lp
             JOIN lessons l ON l.id = lp.lesson_id
             JOIN modules m ON m.id = l.module_id
             WHERE lp.user_id = $1 AND m.course_id = $2
             ORDER BY m.order_index ASC, l.order_index ASC, lp.id ASC",
            cols = COLUMNS
                .split(',')
                .map(|c| format!("lp.{}", c.trim()))
                .collect::<Vec<_>>()
                .join(", ")
        );
        sqlx::query_as::<_, LessonProgress>(&query)
            .bind(user_id)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Published lessons of a module and how many of them the user finished.
    pub async fn module_counts<'e, E>(
        executor: E,
        user_id: DbId,
        module_id: DbId,
    ) -> Result<CompletionCounts, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, CompletionCounts>(
            "SELECT COUNT(*)::BIGINT AS published,
                    COUNT(lp.id) FILTER (WHERE lp.is_completed)::BIGINT AS completed
             FROM lessons l
             LEFT JOIN lesson_progress lp ON lp.lesson_id = l.id AND lp.user_id = $1
             WHERE l.module_id = $2 AND l.is_published",
        )
        .bind(user_id)
        .bind(module_id)
        .fetch_one(executor)
        .await
    }

    /// Published lessons across the published modules of a course and how
    /// many of them the user finished.
    pub async fn course_counts<'e, E>(
        executor: E,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<CompletionCounts, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, CompletionCounts>(
            "SELECT COUNT(*)::BIGINT AS published,
                    COUNT(lp.id) FILTER (WHERE lp.is_completed)::BIGINT AS completed
             FROM lessons l
             JOIN modules m ON m.id = l.module_id
             LEFT JOIN lesson_progress lp ON lp.lesson_id = l.id AND lp.user_id = $1
             WHERE m.course_id = $2 AND m.is_published AND l.is_published",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(executor)
        .await
    }

    /// Delete a user's lesson progress within one course.
    pub async fn delete_for_course<'e, E>(
        executor: E,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "DELETE FROM lesson_progress lp
             USING lessons l, modules m
             WHERE lp.lesson_id = l.id AND l.module_id = m.id
               AND lp.user_id = $1 AND m.course_id = $2",
        )
        .bind(user_id)
        .bind(course_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }
}
