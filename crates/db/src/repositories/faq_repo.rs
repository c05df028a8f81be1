//! Repository for `faqs`.

use lisan_core::pagination::PageRequest;
use lisan_core::search::{resolve_sort_column, SortOrder};
use lisan_core::types::DbId;
use sqlx::PgPool;

use crate::models::faq::{CreateFaq, Faq, FaqFilter, UpdateFaq, FAQ_SORT_COLUMNS};

const COLUMNS: &str = "id, question, answer, category, is_active, created_at, updated_at";

const FILTER_CLAUSE: &str = "($1::TEXT IS NULL OR question ILIKE $1 OR answer ILIKE $1)
       AND ($2::TEXT IS NULL OR category = $2)
       AND ($3::BOOLEAN IS NULL OR is_active = $3)";

pub struct FaqRepo;

impl FaqRepo {
    pub async fn create(pool: &PgPool, input: &CreateFaq) -> Result<Faq, sqlx::Error> {
        let query = format!(
            "INSERT INTO faqs (question, answer, category, is_active)
             VALUES ($1, $2, COALESCE($3, 'general'), COALESCE($4, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Faq>(&query)
            .bind(&input.question)
            .bind(&input.answer)
            .bind(&input.category)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Faq>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM faqs WHERE id = $1");
        sqlx::query_as::<_, Faq>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &FaqFilter,
        sort_by: Option<&str>,
        order: SortOrder,
        page: &PageRequest,
    ) -> Result<Vec<Faq>, sqlx::Error> {
        let sort = resolve_sort_column(sort_by, FAQ_SORT_COLUMNS, "created_at");
        let dir = order.as_sql();
        let query = format!(
            "SELECT {COLUMNS} FROM faqs
             WHERE {FILTER_CLAUSE}
             ORDER BY {sort} {dir}, id {dir}
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Faq>(&query)
            .bind(&filter.search)
            .bind(&filter.category)
            .bind(filter.is_active)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &FaqFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*)::BIGINT FROM faqs WHERE {FILTER_CLAUSE}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(&filter.search)
            .bind(&filter.category)
            .bind(filter.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateFaq) -> Result<Option<Faq>, sqlx::Error> {
        let query = format!(
            "UPDATE faqs SET
                question = COALESCE($2, question),
                answer = COALESCE($3, answer),
                category = COALESCE($4, category),
                is_active = COALESCE($5, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Faq>(&query)
            .bind(id)
            .bind(&input.question)
            .bind(&input.answer)
            .bind(&input.category)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM faqs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
