//! Automatic achievement unlocks.

use std::collections::HashSet;

use lisan_core::achievements::{newly_unlocked, AchievementMetrics, AchievementType};
use lisan_core::types::DbId;
use lisan_db::models::achievement::Achievement;
use lisan_db::repositories::{AchievementRepo, UserAchievementRepo};
use sqlx::PgPool;

use crate::engine::non_fatal::non_fatal;

/// Achievement types a set of metrics can decide.
fn types_for(metrics: &AchievementMetrics) -> Vec<&'static str> {
    let mut types = Vec::with_capacity(3);
    if metrics.total_xp.is_some() {
        types.push(AchievementType::XpReached.as_str());
    }
    if metrics.level.is_some() {
        types.push(AchievementType::LevelReached.as_str());
    }
    if metrics.current_streak.is_some() {
        types.push(AchievementType::StreakReached.as_str());
    }
    types
}

/// Grant every catalog achievement `metrics` satisfies that the user does
/// not own yet. Returns the newly granted achievements.
///
/// Grants use `ON CONFLICT DO NOTHING`, so concurrent checks never create
/// duplicate rows.
pub async fn check_achievements(
    pool: &PgPool,
    user_id: DbId,
    metrics: AchievementMetrics,
) -> Result<Vec<Achievement>, sqlx::Error> {
    let types = types_for(&metrics);
    if types.is_empty() {
        return Ok(Vec::new());
    }

    let catalog = AchievementRepo::list_by_types(pool, &types).await?;
    if catalog.is_empty() {
        return Ok(Vec::new());
    }
    let owned: HashSet<DbId> = UserAchievementRepo::owned_ids(pool, user_id)
        .await?
        .into_iter()
        .collect();

    let entries: Vec<_> = catalog.iter().map(Achievement::catalog_entry).collect();
    let ids = newly_unlocked(&entries, &owned, &metrics);

    let mut unlocked = Vec::with_capacity(ids.len());
    for id in ids {
        if UserAchievementRepo::grant_if_missing(pool, user_id, id)
            .await?
            .is_some()
        {
            if let Some(achievement) = catalog.iter().find(|a| a.id == id) {
                tracing::info!(user_id, achievement_id = id, slug = %achievement.slug, "Achievement unlocked");
                unlocked.push(achievement.clone());
            }
        }
    }
    Ok(unlocked)
}

/// [`check_achievements`] as best-effort enrichment: failures are logged
/// and reported as "nothing unlocked".
pub async fn check_after_commit(
    pool: &PgPool,
    user_id: DbId,
    metrics: AchievementMetrics,
) -> Vec<Achievement> {
    non_fatal("achievement check", check_achievements(pool, user_id, metrics))
        .await
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_follow_present_metrics() {
        let metrics = AchievementMetrics {
            total_xp: Some(10),
            level: Some(1),
            current_streak: None,
        };
        assert_eq!(types_for(&metrics), vec!["XP_REACHED", "LEVEL_REACHED"]);

        let streak_only = AchievementMetrics {
            current_streak: Some(3),
            ..Default::default()
        };
        assert_eq!(types_for(&streak_only), vec!["STREAK_REACHED"]);
        assert!(types_for(&AchievementMetrics::default()).is_empty());
    }
}
