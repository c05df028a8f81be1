//! Repository for `user_streaks`.

use lisan_core::pagination::PageRequest;
use lisan_core::streak::StreakState;
use lisan_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::streak::{StreakWithUser, UpdateStreak, UserStreak};

const COLUMNS: &str = "id, user_id, current_streak, longest_streak, last_activity_date, \
                       freeze_count, created_at, updated_at";

pub struct StreakRepo;

impl StreakRepo {
    pub async fn find_by_user(pool: &PgPool, user_id: DbId) -> Result<Option<UserStreak>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_streaks WHERE user_id = $1");
        sqlx::query_as::<_, UserStreak>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Return the user's streak row, creating a zeroed one on first access.
    pub async fn get_or_create(pool: &PgPool, user_id: DbId) -> Result<UserStreak, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_streaks (user_id) VALUES ($1)
             ON CONFLICT ON CONSTRAINT uq_user_streaks_user
                DO UPDATE SET user_id = EXCLUDED.user_id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserStreak>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Like [`StreakRepo::get_or_create`] but locks the row for the rest
    /// of the transaction.
    pub async fn lock_or_create(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<UserStreak, sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_streaks (user_id) VALUES ($1)
             ON CONFLICT ON CONSTRAINT uq_user_streaks_user DO NOTHING",
        )
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

        let query = format!("SELECT {COLUMNS} FROM user_streaks WHERE user_id = $1 FOR UPDATE");
        sqlx::query_as::<_, UserStreak>(&query)
            .bind(user_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Persist the counters produced by the streak state machine.
    pub async fn save_state<'e, E>(
        executor: E,
        user_id: DbId,
        state: &StreakState,
    ) -> Result<UserStreak, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE user_streaks SET
                current_streak = $2,
                longest_streak = $3,
                last_activity_date = $4,
                freeze_count = $5
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserStreak>(&query)
            .bind(user_id)
            .bind(state.current_streak)
            .bind(state.longest_streak)
            .bind(state.last_activity_date)
            .bind(state.freeze_count)
            .fetch_one(executor)
            .await
    }

    /// Admin listing, longest current streak first.
    pub async fn list(pool: &PgPool, page: &PageRequest) -> Result<Vec<StreakWithUser>, sqlx::Error> {
        sqlx::query_as::<_, StreakWithUser>(
            "SELECT s.id, s.user_id, u.username, s.current_streak, s.longest_streak,
                    s.last_activity_date, s.freeze_count, s.updated_at
             FROM user_streaks s
             JOIN users u ON u.id = s.user_id
             ORDER BY s.current_streak DESC, s.user_id ASC
             LIMIT $1 OFFSET $2",
        )
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(pool)
        .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM user_streaks")
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStreak,
    ) -> Result<Option<UserStreak>, sqlx::Error> {
        let query = format!(
            "UPDATE user_streaks SET
                current_streak = COALESCE($2, current_streak),
                longest_streak = COALESCE($3, longest_streak),
                freeze_count = COALESCE($4, freeze_count)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserStreak>(&query)
            .bind(id)
            .bind(input.current_streak)
            .bind(input.longest_streak)
            .bind(input.freeze_count)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_streaks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
