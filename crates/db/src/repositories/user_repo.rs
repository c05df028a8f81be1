//! Repository for the `users` table.

use lisan_core::pagination::PageRequest;
use lisan_core::search::{resolve_sort_column, SortOrder};
use lisan_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::user::{CreateUser, UpdateUser, User, UserFilter, UserStats, XpState, USER_SORT_COLUMNS};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, username, password_hash, full_name, avatar_url, role, \
                       is_verified, is_premium, xp, total_xp, level, last_login_at, \
                       created_at, updated_at";

/// Shared `WHERE` clause for [`UserRepo::list`] and [`UserRepo::count`].
const FILTER_CLAUSE: &str = "($1::TEXT IS NULL OR email ILIKE $1 OR username ILIKE $1 OR full_name ILIKE $1)
       AND ($2::TEXT IS NULL OR role = $2)
       AND ($3::BOOLEAN IS NULL OR is_premium = $3)
       AND ($4::BOOLEAN IS NULL OR is_verified = $4)";

/// Which of a candidate email/username pair is already taken.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityClash {
    pub email_taken: bool,
    pub username_taken: bool,
}

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, username, password_hash, full_name, role, is_verified)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.full_name)
            .bind(&input.role)
            .bind(input.is_verified)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<User>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a user by email (stored lowercased).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Check whether an email and/or username belongs to someone other than
    /// `exclude_id`. `None` candidates are never reported as taken.
    pub async fn find_identity_clash(
        pool: &PgPool,
        email: Option<&str>,
        username: Option<&str>,
        exclude_id: Option<DbId>,
    ) -> Result<IdentityClash, sqlx::Error> {
        let (email_taken, username_taken): (bool, bool) = sqlx::query_as(
            "SELECT
                EXISTS(SELECT 1 FROM users WHERE email = $1 AND ($3::BIGINT IS NULL OR id <> $3)),
                EXISTS(SELECT 1 FROM users WHERE username = $2 AND ($3::BIGINT IS NULL OR id <> $3))",
        )
        .bind(email)
        .bind(username)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
        Ok(IdentityClash {
            email_taken,
            username_taken,
        })
    }

    /// List users matching `filter`, sorted by a whitelisted column.
    ///
    /// Ties are broken by id so pages are stable.
    pub async fn list(
        pool: &PgPool,
        filter: &UserFilter,
        sort_by: Option<&str>,
        order: SortOrder,
        page: &PageRequest,
    ) -> Result<Vec<User>, sqlx::Error> {
        let sort = resolve_sort_column(sort_by, USER_SORT_COLUMNS, "created_at");
        let dir = order.as_sql();
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE {FILTER_CLAUSE}
             ORDER BY {sort} {dir} NULLS LAST, id {dir}
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&filter.search)
            .bind(&filter.role)
            .bind(filter.is_premium)
            .bind(filter.is_verified)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Count users matching `filter`.
    pub async fn count(pool: &PgPool, filter: &UserFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*)::BIGINT FROM users WHERE {FILTER_CLAUSE}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(&filter.search)
            .bind(&filter.role)
            .bind(filter.is_premium)
            .bind(filter.is_verified)
            .fetch_one(pool)
            .await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                email = COALESCE($2, email),
                username = COALESCE($3, username),
                full_name = COALESCE($4, full_name),
                avatar_url = COALESCE($5, avatar_url),
                role = COALESCE($6, role),
                is_verified = COALESCE($7, is_verified),
                is_premium = COALESCE($8, is_premium),
                password_hash = COALESCE($9, password_hash)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.email)
            .bind(&input.username)
            .bind(&input.full_name)
            .bind(&input.avatar_url)
            .bind(&input.role)
            .bind(input.is_verified)
            .bind(input.is_premium)
            .bind(&input.password_hash)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a user. Progress rows cascade. Returns `true` if a row
    /// was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark a user's email as verified.
    pub async fn mark_verified<'e, E>(executor: E, id: DbId) -> Result<(), sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query("UPDATE users SET is_verified = true WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Set `last_login_at` to now.
    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Read the XP counters and lock the row until the surrounding
    /// transaction ends.
    pub async fn lock_xp<'e, E>(executor: E, id: DbId) -> Result<Option<XpState>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, XpState>(
            "SELECT xp, total_xp, level FROM users WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Overwrite the XP counters. Callers must hold the row lock from
    /// [`UserRepo::lock_xp`].
    pub async fn set_xp<'e, E>(
        executor: E,
        id: DbId,
        xp: i64,
        total_xp: i64,
        level: i32,
    ) -> Result<(), sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query("UPDATE users SET xp = $2, total_xp = $3, level = $4 WHERE id = $1")
            .bind(id)
            .bind(xp)
            .bind(total_xp)
            .bind(level)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Aggregate counters for the admin dashboard.
    pub async fn stats(pool: &PgPool) -> Result<UserStats, sqlx::Error> {
        sqlx::query_as::<_, UserStats>(
            "SELECT
                COUNT(*)::BIGINT AS total_users,
                COUNT(*) FILTER (WHERE is_verified)::BIGINT AS verified_users,
                COUNT(*) FILTER (WHERE is_premium)::BIGINT AS premium_users,
                COUNT(*) FILTER (WHERE role = 'admin')::BIGINT AS admins,
                COUNT(*) FILTER (WHERE level > 1)::BIGINT AS active_users,
                COUNT(*) FILTER (WHERE last_login_at >= date_trunc('day', NOW()))::BIGINT
                    AS active_today
             FROM users",
        )
        .fetch_one(pool)
        .await
    }
}
