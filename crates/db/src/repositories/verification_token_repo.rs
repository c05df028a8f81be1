//! Repository for the `verification_tokens` table.

use lisan_core::types::{DbId, Timestamp};
use sqlx::{PgExecutor, PgPool};

use crate::models::verification::VerificationToken;

const COLUMNS: &str = "id, user_id, code_hash, token_type, expires_at, used_at, created_at";

pub struct VerificationTokenRepo;

impl VerificationTokenRepo {
    /// Store a new code digest for a user.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        code_hash: &str,
        token_type: &str,
        expires_at: Timestamp,
    ) -> Result<VerificationToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO verification_tokens (user_id, code_hash, token_type, expires_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VerificationToken>(&query)
            .bind(user_id)
            .bind(code_hash)
            .bind(token_type)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find an unused, unexpired token matching the code digest.
    pub async fn find_valid(
        pool: &PgPool,
        user_id: DbId,
        code_hash: &str,
        token_type: &str,
    ) -> Result<Option<VerificationToken>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM verification_tokens
             WHERE user_id = $1 AND code_hash = $2 AND token_type = $3
               AND used_at IS NULL AND expires_at > NOW()
             ORDER BY created_at DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, VerificationToken>(&query)
            .bind(user_id)
            .bind(code_hash)
            .bind(token_type)
            .fetch_optional(pool)
            .await
    }

    /// Mark a single token as used.
    pub async fn mark_used<'e, E>(executor: E, id: DbId) -> Result<(), sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query("UPDATE verification_tokens SET used_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Invalidate every outstanding token of a type for a user.
    ///
    /// Returns the number of tokens invalidated.
    pub async fn invalidate_outstanding(
        pool: &PgPool,
        user_id: DbId,
        token_type: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE verification_tokens SET used_at = NOW()
             WHERE user_id = $1 AND token_type = $2 AND used_at IS NULL",
        )
        .bind(user_id)
        .bind(token_type)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
