//! Daily streak hits.

use lisan_core::achievements::AchievementMetrics;
use lisan_core::quests::ACTION_STREAK_HIT;
use lisan_core::streak::{advance_streak, StreakTransition};
use lisan_core::types::{Date, DbId};
use lisan_db::models::streak::UserStreak;
use lisan_db::repositories::StreakRepo;
use serde::Serialize;
use sqlx::{PgConnection, PgPool};

use crate::engine::achievements::check_after_commit;
use crate::engine::non_fatal::non_fatal;
use crate::engine::quests::record_action;
use crate::error::AppResult;

/// Outcome of a streak hit.
#[derive(Debug, Clone, Serialize)]
pub struct StreakHit {
    pub streak: UserStreak,
    pub transition: StreakTransition,
}

/// Apply today's activity to the user's streak inside the caller's
/// transaction. The row is locked before it is read.
pub async fn hit_in(conn: &mut PgConnection, user_id: DbId, today: Date) -> AppResult<StreakHit> {
    let row = StreakRepo::lock_or_create(&mut *conn, user_id).await?;
    let (next, transition) = advance_streak(row.state(), today);

    let streak = if transition.is_write() {
        StreakRepo::save_state(&mut *conn, user_id, &next).await?
    } else {
        row
    };

    tracing::debug!(user_id, ?transition, current = streak.current_streak, "Streak hit");
    Ok(StreakHit { streak, transition })
}

/// Record a streak hit in its own transaction, then run the streak
/// achievement check and quest progress.
pub async fn hit(pool: &PgPool, user_id: DbId, today: Date) -> AppResult<StreakHit> {
    let mut tx = pool.begin().await?;
    let outcome = hit_in(&mut tx, user_id, today).await?;
    tx.commit().await?;

    after_hit(pool, user_id, &outcome).await;
    Ok(outcome)
}

/// Post-commit enrichment for a streak hit. Only counted hits advance
/// quests.
pub async fn after_hit(pool: &PgPool, user_id: DbId, outcome: &StreakHit) {
    if !outcome.transition.is_write() {
        return;
    }
    check_after_commit(
        pool,
        user_id,
        AchievementMetrics {
            current_streak: Some(outcome.streak.current_streak),
            ..Default::default()
        },
    )
    .await;
    non_fatal("quest progress", record_action(pool, user_id, ACTION_STREAK_HIT)).await;
}
