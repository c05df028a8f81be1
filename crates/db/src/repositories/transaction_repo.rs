//! Repository for payment `transactions`.

use lisan_core::pagination::PageRequest;
use lisan_core::types::DbId;
use sqlx::PgPool;

use crate::models::transaction::{
    CreatePaymentTransaction, PaymentTransaction, UpdatePaymentTransaction,
};

const COLUMNS: &str = "id, user_id, amount, status, provider, provider_order_id, payment_method, \
                       metadata, created_at, updated_at";

const FILTER_CLAUSE: &str = "($1::TEXT IS NULL OR status = $1)
       AND ($2::BIGINT IS NULL OR user_id = $2)";

pub struct TransactionRepo;

impl TransactionRepo {
    /// Record a new transaction in `pending` state.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePaymentTransaction,
    ) -> Result<PaymentTransaction, sqlx::Error> {
        let query = format!(
            "INSERT INTO transactions (user_id, amount, provider, payment_method, metadata)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PaymentTransaction>(&query)
            .bind(input.user_id)
            .bind(input.amount)
            .bind(&input.provider)
            .bind(&input.payment_method)
            .bind(&input.metadata)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PaymentTransaction>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM transactions WHERE id = $1");
        sqlx::query_as::<_, PaymentTransaction>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List transactions, newest first, optionally for one user.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        user_id: Option<DbId>,
        page: &PageRequest,
    ) -> Result<Vec<PaymentTransaction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transactions
             WHERE {FILTER_CLAUSE}
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, PaymentTransaction>(&query)
            .bind(status)
            .bind(user_id)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    pub async fn count(
        pool: &PgPool,
        status: Option<&str>,
        user_id: Option<DbId>,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*)::BIGINT FROM transactions WHERE {FILTER_CLAUSE}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(status)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePaymentTransaction,
    ) -> Result<Option<PaymentTransaction>, sqlx::Error> {
        let query = format!(
            "UPDATE transactions SET
                status = COALESCE($2, status),
                provider_order_id = COALESCE($3, provider_order_id),
                metadata = COALESCE($4, metadata)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PaymentTransaction>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(&input.provider_order_id)
            .bind(&input.metadata)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
