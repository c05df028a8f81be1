//! Daily quest assignment, progress and reward claims.

use lisan_core::gamification::XpGrant;
use lisan_core::quests::{advance_progress, claim_blocker};
use lisan_core::types::DbId;
use lisan_db::models::quest::UserQuestDetail;
use lisan_db::repositories::QuestRepo;
use sqlx::PgPool;

use crate::engine::achievements::check_after_commit;
use crate::engine::today;
use crate::engine::xp::{grant_xp_in, xp_metrics};
use crate::error::{AppError, AppResult};

/// Today's quests for the user, assigning any active quest not yet given.
pub async fn daily(pool: &PgPool, user_id: DbId) -> AppResult<Vec<UserQuestDetail>> {
    let date = today();
    let assigned = QuestRepo::assign_active(pool, user_id, date).await?;
    if assigned > 0 {
        tracing::debug!(user_id, assigned, %date, "Daily quests assigned");
    }
    Ok(QuestRepo::list_for_user(pool, user_id, date).await?)
}

/// Count one `action_type` against today's open quests.
///
/// Returns the number of quests that completed with this action.
pub async fn record_action(
    pool: &PgPool,
    user_id: DbId,
    action_type: &str,
) -> Result<usize, sqlx::Error> {
    let date = today();
    let mut tx = pool.begin().await?;
    QuestRepo::assign_active(&mut *tx, user_id, date).await?;

    let open = QuestRepo::lock_open_for_action(&mut tx, user_id, date, action_type).await?;
    let mut completed = 0;
    for quest in &open {
        let (progress, done) = advance_progress(quest.progress_count, quest.target_count);
        QuestRepo::set_progress(&mut *tx, quest.id, progress, done).await?;
        if done {
            completed += 1;
        }
    }
    tx.commit().await?;

    if completed > 0 {
        tracing::info!(user_id, action_type, completed, "Quests completed");
    }
    Ok(completed)
}

/// Claim a completed quest's reward. The XP grant and the claim flag are
/// written in one transaction so a reward is paid at most once.
pub async fn claim(pool: &PgPool, user_id: DbId, user_quest_id: DbId) -> AppResult<XpGrant> {
    let mut tx = pool.begin().await?;
    let quest = QuestRepo::lock_for_user(&mut tx, user_quest_id, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Quest", user_quest_id))?;

    if let Some(reason) = claim_blocker(quest.is_completed, quest.is_claimed) {
        return Err(AppError::BadRequest(reason.to_string()));
    }

    QuestRepo::mark_claimed(&mut *tx, quest.id).await?;
    let grant = grant_xp_in(&mut tx, user_id, i64::from(quest.xp_reward)).await?;
    tx.commit().await?;

    tracing::info!(user_id, user_quest_id, xp = quest.xp_reward, "Quest reward claimed");
    check_after_commit(pool, user_id, xp_metrics(&grant)).await;
    Ok(grant)
}
