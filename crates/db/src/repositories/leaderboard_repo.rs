//! Read-only ranking queries.
//!
//! Every ranking breaks ties by ascending user id so ranks are stable
//! across pages.

use lisan_core::pagination::PageRequest;
use sqlx::PgPool;

use crate::models::leaderboard::{
    LeaderboardMetric, LeaderboardUser, PeriodicLeaderboardRow, StreakLeaderboardRow,
};

pub struct LeaderboardRepo;

impl LeaderboardRepo {
    /// Live ranking over `users`.
    pub async fn live(
        pool: &PgPool,
        metric: LeaderboardMetric,
        page: &PageRequest,
    ) -> Result<Vec<LeaderboardUser>, sqlx::Error> {
        let column = metric.column();
        let query = format!(
            "SELECT id AS user_id, username, full_name, avatar_url, xp, total_xp, level
             FROM users
             ORDER BY {column} DESC, id ASC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, LeaderboardUser>(&query)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    pub async fn count_users(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM users")
            .fetch_one(pool)
            .await
    }

    /// Ranking from the snapshot table for one period.
    pub async fn periodic(
        pool: &PgPool,
        period: &str,
        page: &PageRequest,
    ) -> Result<Vec<PeriodicLeaderboardRow>, sqlx::Error> {
        sqlx::query_as::<_, PeriodicLeaderboardRow>(
            "SELECT lb.user_id, u.username, u.avatar_url, lb.period,
                    lb.xp_snapshot, lb.level_snapshot, lb.updated_at
             FROM leaderboards lb
             JOIN users u ON u.id = lb.user_id
             WHERE lb.period = $1
             ORDER BY lb.xp_snapshot DESC, lb.user_id ASC
             LIMIT $2 OFFSET $3",
        )
        .bind(period)
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(pool)
        .await
    }

    pub async fn count_periodic(pool: &PgPool, period: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM leaderboards WHERE period = $1")
            .bind(period)
            .fetch_one(pool)
            .await
    }

    /// Top users by current streak.
    pub async fn streaks(pool: &PgPool, limit: i64) -> Result<Vec<StreakLeaderboardRow>, sqlx::Error> {
        sqlx::query_as::<_, StreakLeaderboardRow>(
            "SELECT s.user_id, u.username, u.avatar_url, s.current_streak, s.longest_streak
             FROM user_streaks s
             JOIN users u ON u.id = s.user_id
             WHERE s.current_streak > 0
             ORDER BY s.current_streak DESC, s.user_id ASC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
