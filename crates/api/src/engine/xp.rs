//! XP grants.
//!
//! The user row is locked with `SELECT ... FOR UPDATE` before the counters
//! are read, so concurrent grants for one user serialize instead of losing
//! updates. `level` is always recomputed from `total_xp`.

use lisan_core::achievements::AchievementMetrics;
use lisan_core::gamification::{apply_xp, XpGrant};
use lisan_core::types::DbId;
use lisan_db::models::achievement::Achievement;
use lisan_db::repositories::UserRepo;
use sqlx::{PgConnection, PgPool};

use crate::engine::achievements::check_after_commit;
use crate::error::{AppError, AppResult};

/// Grant `amount` XP inside the caller's transaction.
pub async fn grant_xp_in(
    conn: &mut PgConnection,
    user_id: DbId,
    amount: i64,
) -> AppResult<XpGrant> {
    let state = UserRepo::lock_xp(&mut *conn, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User", user_id))?;

    let grant = apply_xp(state.xp, state.total_xp, state.level, amount);
    UserRepo::set_xp(&mut *conn, user_id, grant.xp, grant.total_xp, grant.new_level).await?;

    if grant.leveled_up {
        tracing::info!(
            user_id,
            old_level = grant.old_level,
            new_level = grant.new_level,
            "User leveled up"
        );
    }
    Ok(grant)
}

/// Grant XP in its own transaction, then check XP and level achievements.
pub async fn add_xp(
    pool: &PgPool,
    user_id: DbId,
    amount: i64,
) -> AppResult<(XpGrant, Vec<Achievement>)> {
    let mut tx = pool.begin().await?;
    let grant = grant_xp_in(&mut tx, user_id, amount).await?;
    tx.commit().await?;

    tracing::info!(user_id, amount, total_xp = grant.total_xp, "XP granted");

    let unlocked = check_after_commit(pool, user_id, xp_metrics(&grant)).await;
    Ok((grant, unlocked))
}

/// Achievement metrics implied by an XP grant.
pub fn xp_metrics(grant: &XpGrant) -> AchievementMetrics {
    AchievementMetrics {
        total_xp: Some(grant.total_xp),
        level: Some(grant.new_level),
        current_streak: None,
    }
}
