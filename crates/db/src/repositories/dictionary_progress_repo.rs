//! Repository for `user_dictionary_progress`: the per-dictionary roll-up.

use lisan_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::learning::{
    DictionaryProgress, DictionaryProgressStats, DictionaryProgressWithDictionary,
};
use crate::models::progress::CompletionCounts;

const COLUMNS: &str = "id, user_id, dictionary_id, completed_items, total_items, \
                       progress_percentage, is_completed, completed_at, created_at, updated_at";

pub struct DictionaryProgressRepo;

impl DictionaryProgressRepo {
    /// Items in a dictionary and how many of them the user completed.
    ///
    /// Reuses [`CompletionCounts`]; `published` here is the item total.
    pub async fn item_counts<'e, E>(
        executor: E,
        user_id: DbId,
        dictionary_id: DbId,
    ) -> Result<CompletionCounts, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, CompletionCounts>(
            "SELECT COUNT(*)::BIGINT AS published,
                    COUNT(uip.id) FILTER (WHERE uip.is_completed)::BIGINT AS completed
             FROM dictionary_items di
             LEFT JOIN user_item_progress uip
                ON uip.dictionary_item_id = di.id AND uip.user_id = $1
             WHERE di.dictionary_id = $2",
        )
        .bind(user_id)
        .bind(dictionary_id)
        .fetch_one(executor)
        .await
    }

    /// Write the recomputed roll-up. `completed_at` is set on the first
    /// completion only.
    pub async fn upsert<'e, E>(
        executor: E,
        user_id: DbId,
        dictionary_id: DbId,
        completed_items: i32,
        total_items: i32,
        progress_percentage: i32,
    ) -> Result<DictionaryProgress, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO user_dictionary_progress
                (user_id, dictionary_id, completed_items, total_items, progress_percentage,
                 is_completed, completed_at)
             VALUES ($1, $2, $3, $4, $5, $5 = 100, CASE WHEN $5 = 100 THEN NOW() END)
             ON CONFLICT ON CONSTRAINT uq_user_dictionary_progress_user_dictionary DO UPDATE SET
                completed_items = EXCLUDED.completed_items,
                total_items = EXCLUDED.total_items,
                progress_percentage = EXCLUDED.progress_percentage,
                is_completed = EXCLUDED.is_completed,
                completed_at = CASE
                    WHEN EXCLUDED.is_completed
                        THEN COALESCE(user_dictionary_progress.completed_at, NOW())
                    ELSE NULL
                END
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DictionaryProgress>(&query)
            .bind(user_id)
            .bind(dictionary_id)
            .bind(completed_items)
            .bind(total_items)
            .bind(progress_percentage)
            .fetch_one(executor)
            .await
    }

    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        dictionary_id: DbId,
    ) -> Result<Option<DictionaryProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_dictionary_progress
             WHERE user_id = $1 AND dictionary_id = $2"
        );
        sqlx::query_as::<_, DictionaryProgress>(&query)
            .bind(user_id)
            .bind(dictionary_id)
            .fetch_optional(pool)
            .await
    }

    /// All of a user's dictionary roll-ups, most recently touched first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<DictionaryProgressWithDictionary>, sqlx::Error> {
        sqlx::query_as::<_, DictionaryProgressWithDictionary>(
            "SELECT udp.id, udp.dictionary_id, udp.completed_items, udp.total_items,
                    udp.progress_percentage, udp.is_completed, udp.completed_at, udp.updated_at,
                    d.title AS dictionary_title, d.slug AS dictionary_slug,
                    d.thumbnail_url AS dictionary_thumbnail_url
             FROM user_dictionary_progress udp
             JOIN dictionaries d ON d.id = udp.dictionary_id
             WHERE udp.user_id = $1
             ORDER BY udp.updated_at DESC, udp.id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub async fn stats(pool: &PgPool, user_id: DbId) -> Result<DictionaryProgressStats, sqlx::Error> {
        sqlx::query_as::<_, DictionaryProgressStats>(
            "SELECT
                (SELECT COUNT(*) FROM user_dictionary_progress
                  WHERE user_id = $1 AND is_completed)::BIGINT AS total_dictionaries_completed,
                (SELECT COUNT(*) FROM user_item_progress
                  WHERE user_id = $1 AND is_completed)::BIGINT AS total_items_learned,
                COALESCE((SELECT ROUND(AVG(progress_percentage)) FROM user_dictionary_progress
                  WHERE user_id = $1), 0)::BIGINT AS average_progress",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    pub async fn delete<'e, E>(
        executor: E,
        user_id: DbId,
        dictionary_id: DbId,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "DELETE FROM user_dictionary_progress WHERE user_id = $1 AND dictionary_id = $2",
        )
        .bind(user_id)
        .bind(dictionary_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
