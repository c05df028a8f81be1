//! Repository for the `module_progress` table.

use lisan_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::progress::ModuleProgress;

const COLUMNS: &str = "id, user_id, module_id, is_completed, completed_at, created_at, updated_at";

pub struct ModuleProgressRepo;

impl ModuleProgressRepo {
    /// Insert or update a user's completion flag for a module.
    ///
    /// `completed_at` is kept from the first completion and cleared if the
    /// module becomes incomplete again.
    pub async fn upsert<'e, E>(
        executor: E,
        user_id: DbId,
        module_id: DbId,
        is_completed: bool,
    ) -> Result<ModuleProgress, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO module_progress (user_id, module_id, is_completed, completed_at)
             VALUES ($1, $2, $3, CASE WHEN $3 THEN NOW() END)
             ON CONFLICT ON CONSTRAINT uq_module_progress_user_module DO UPDATE SET
                is_completed = EXCLUDED.is_completed,
                completed_at = CASE
                    WHEN EXCLUDED.is_completed
                        THEN COALESCE(module_progress.completed_at, NOW())
                    ELSE NULL
                END
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ModuleProgress>(&query)
            .bind(user_id)
            .bind(module_id)
            .bind(is_completed)
            .fetch_one(executor)
            .await
    }

    /// Delete a user's module rows within one course.
    pub async fn delete_for_course<'e, E>(
        executor: E,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "DELETE FROM module_progress mp
             USING modules m
             WHERE mp.module_id = m.id AND mp.user_id = $1 AND m.course_id = $2",
        )
        .bind(user_id)
        .bind(course_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }
}
