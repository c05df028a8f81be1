//! Repository for the `dictionaries` table.

use lisan_core::pagination::PageRequest;
use lisan_core::types::DbId;
use sqlx::PgPool;

use crate::models::dictionary::{CreateDictionary, Dictionary, DictionaryFilter, UpdateDictionary};

const COLUMNS: &str = "id, title, slug, description, thumbnail_url, status, difficulty, \
                       order_index, created_at, updated_at";

const FILTER_CLAUSE: &str = "($1::TEXT IS NULL OR title ILIKE $1 OR description ILIKE $1)
       AND ($2::TEXT IS NULL OR status = $2)
       AND ($3::TEXT IS NULL OR difficulty = $3)";

/// Provides CRUD operations for sign dictionaries.
pub struct DictionaryRepo;

impl DictionaryRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateDictionary,
    ) -> Result<Dictionary, sqlx::Error> {
        let query = format!(
            "INSERT INTO dictionaries
                (title, slug, description, thumbnail_url, status, difficulty, order_index)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dictionary>(&query)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.thumbnail_url)
            .bind(&input.status)
            .bind(&input.difficulty)
            .bind(input.order_index)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Dictionary>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dictionaries WHERE id = $1");
        sqlx::query_as::<_, Dictionary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn slug_exists(
        pool: &PgPool,
        slug: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM dictionaries WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// List dictionaries in display order.
    pub async fn list(
        pool: &PgPool,
        filter: &DictionaryFilter,
        page: &PageRequest,
    ) -> Result<Vec<Dictionary>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM dictionaries
             WHERE {FILTER_CLAUSE}
             ORDER BY order_index ASC, id ASC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Dictionary>(&query)
            .bind(&filter.search)
            .bind(&filter.status)
            .bind(&filter.difficulty)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &DictionaryFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*)::BIGINT FROM dictionaries WHERE {FILTER_CLAUSE}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(&filter.search)
            .bind(&filter.status)
            .bind(&filter.difficulty)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDictionary,
    ) -> Result<Option<Dictionary>, sqlx::Error> {
        let query = format!(
            "UPDATE dictionaries SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                thumbnail_url = COALESCE($5, thumbnail_url),
                status = COALESCE($6, status),
                difficulty = COALESCE($7, difficulty),
                order_index = COALESCE($8, order_index)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dictionary>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.thumbnail_url)
            .bind(&input.status)
            .bind(&input.difficulty)
            .bind(input.order_index)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dictionaries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
