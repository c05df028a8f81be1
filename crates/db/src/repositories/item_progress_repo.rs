//! Repository for `user_item_progress`: per-item mastery and completion.

use lisan_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::learning::{DueItem, ItemProgress, ItemReview};

const COLUMNS: &str = "id, user_id, dictionary_item_id, is_completed, mastery_level, streak_count, \
                       last_reviewed_at, next_review_at, completed_at, created_at, updated_at";

pub struct ItemProgressRepo;

impl ItemProgressRepo {
    /// Fetch the user's row for an item, creating a blank one if needed,
    /// and lock it for the rest of the transaction.
    pub async fn lock_or_create(
        conn: &mut PgConnection,
        user_id: DbId,
        item_id: DbId,
    ) -> Result<ItemProgress, sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_item_progress (user_id, dictionary_item_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_user_item_progress_user_item DO NOTHING",
        )
        .bind(user_id)
        .bind(item_id)
        .execute(&mut *conn)
        .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM user_item_progress
             WHERE user_id = $1 AND dictionary_item_id = $2
             FOR UPDATE"
        );
        sqlx::query_as::<_, ItemProgress>(&query)
            .bind(user_id)
            .bind(item_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Store the outcome of a quiz answer. Practising an item marks it
    /// completed.
    pub async fn record_review<'e, E>(
        executor: E,
        user_id: DbId,
        item_id: DbId,
        review: &ItemReview,
    ) -> Result<ItemProgress, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE user_item_progress SET
                is_completed = true,
                completed_at = COALESCE(completed_at, NOW()),
                mastery_level = $3,
                streak_count = $4,
                next_review_at = $5,
                last_reviewed_at = NOW()
             WHERE user_id = $1 AND dictionary_item_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ItemProgress>(&query)
            .bind(user_id)
            .bind(item_id)
            .bind(review.mastery_level)
            .bind(review.streak_count)
            .bind(review.next_review_at)
            .fetch_one(executor)
            .await
    }

    /// Mark an item completed or not without touching mastery.
    pub async fn set_completion<'e, E>(
        executor: E,
        user_id: DbId,
        item_id: DbId,
        is_completed: bool,
    ) -> Result<ItemProgress, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO user_item_progress (user_id, dictionary_item_id, is_completed, completed_at)
             VALUES ($1, $2, $3, CASE WHEN $3 THEN NOW() END)
             ON CONFLICT ON CONSTRAINT uq_user_item_progress_user_item DO UPDATE SET
                is_completed = EXCLUDED.is_completed,
                completed_at = CASE
                    WHEN EXCLUDED.is_completed
                        THEN COALESCE(user_item_progress.completed_at, NOW())
                    ELSE NULL
                END
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ItemProgress>(&query)
            .bind(user_id)
            .bind(item_id)
            .bind(is_completed)
            .fetch_one(executor)
            .await
    }

    /// Items the user has never reviewed or whose review date has passed,
    /// lowest mastery first.
    pub async fn due_items(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<DueItem>, sqlx::Error> {
        sqlx::query_as::<_, DueItem>(
            "SELECT di.id, di.dictionary_id, di.word, di.definition, di.video_url, di.image_url,
                    di.item_type, uip.mastery_level, uip.next_review_at
             FROM dictionary_items di
             LEFT JOIN user_item_progress uip
                ON uip.dictionary_item_id = di.id AND uip.user_id = $1
             WHERE uip.id IS NULL OR uip.next_review_at IS NULL OR uip.next_review_at <= NOW()
             ORDER BY uip.mastery_level ASC NULLS FIRST, di.id ASC
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Number of items the user has completed across all dictionaries.
    pub async fn count_completed(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT FROM user_item_progress WHERE user_id = $1 AND is_completed",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Delete a user's item rows for one dictionary.
    pub async fn delete_for_dictionary<'e, E>(
        executor: E,
        user_id: DbId,
        dictionary_id: DbId,
    ) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "DELETE FROM user_item_progress uip
             USING dictionary_items di
             WHERE uip.dictionary_item_id = di.id
               AND uip.user_id = $1 AND di.dictionary_id = $2",
        )
        .bind(user_id)
        .bind(dictionary_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }
}
