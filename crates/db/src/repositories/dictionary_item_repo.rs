//! Repository for the `dictionary_items` table.

use lisan_core::pagination::PageRequest;
use lisan_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::dictionary::{
    CreateDictionaryItem, DictionaryItem, DictionaryItemFilter, UpdateDictionaryItem,
};

const COLUMNS: &str = "id, dictionary_id, word, slug, definition, video_url, image_url, \
                       item_type, order_index, ai_model_id, created_at, updated_at";

const FILTER_CLAUSE: &str = "dictionary_id = $1
       AND ($2::TEXT IS NULL OR word ILIKE $2 OR definition ILIKE $2)
       AND ($3::TEXT IS NULL OR item_type = $3)";

/// Provides CRUD operations for dictionary items (individual signs).
pub struct DictionaryItemRepo;

impl DictionaryItemRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateDictionaryItem,
    ) -> Result<DictionaryItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO dictionary_items
                (dictionary_id, word, slug, definition, video_url, image_url,
                 item_type, order_index, ai_model_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DictionaryItem>(&query)
            .bind(input.dictionary_id)
            .bind(&input.word)
            .bind(&input.slug)
            .bind(&input.definition)
            .bind(&input.video_url)
            .bind(&input.image_url)
            .bind(&input.item_type)
            .bind(input.order_index)
            .bind(input.ai_model_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<DictionaryItem>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM dictionary_items WHERE id = $1");
        sqlx::query_as::<_, DictionaryItem>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn slug_exists(
        pool: &PgPool,
        dictionary_id: DbId,
        slug: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM dictionary_items
                WHERE dictionary_id = $1 AND slug = $2 AND ($3::BIGINT IS NULL OR id <> $3)
             )",
        )
        .bind(dictionary_id)
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// Items of one dictionary in display order.
    pub async fn list_by_dictionary(
        pool: &PgPool,
        dictionary_id: DbId,
        filter: &DictionaryItemFilter,
        page: &PageRequest,
    ) -> Result<Vec<DictionaryItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM dictionary_items
             WHERE {FILTER_CLAUSE}
             ORDER BY order_index ASC, id ASC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, DictionaryItem>(&query)
            .bind(dictionary_id)
            .bind(&filter.search)
            .bind(&filter.item_type)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    pub async fn count_by_dictionary(
        pool: &PgPool,
        dictionary_id: DbId,
        filter: &DictionaryItemFilter,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*)::BIGINT FROM dictionary_items WHERE {FILTER_CLAUSE}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(dictionary_id)
            .bind(&filter.search)
            .bind(&filter.item_type)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDictionaryItem,
    ) -> Result<Option<DictionaryItem>, sqlx::Error> {
        let query = format!(
            "UPDATE dictionary_items SET
                word = COALESCE($2, word),
                slug = COALESCE($3, slug),
                definition = COALESCE($4, definition),
                video_url = COALESCE($5, video_url),
                image_url = COALESCE($6, image_url),
                item_type = COALESCE($7, item_type),
                order_index = COALESCE($8, order_index),
                ai_model_id = COALESCE($9, ai_model_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DictionaryItem>(&query)
            .bind(id)
            .bind(&input.word)
            .bind(&input.slug)
            .bind(&input.definition)
            .bind(&input.video_url)
            .bind(&input.image_url)
            .bind(&input.item_type)
            .bind(input.order_index)
            .bind(input.ai_model_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dictionary_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
