//! Repositories for the `achievements` catalog and `user_achievements`
//! grants.

use lisan_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::achievement::{
    Achievement, CreateAchievement, UpdateAchievement, UserAchievement, UserAchievementDetail,
};

const COLUMNS: &str = "id, title, slug, description, icon_url, category, achievement_type, \
                       target_value, xp_reward, created_at, updated_at";

const GRANT_COLUMNS: &str = "id, user_id, achievement_id, unlocked_at";

/// Provides CRUD operations for the achievement catalog.
pub struct AchievementRepo;

impl AchievementRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateAchievement,
    ) -> Result<Achievement, sqlx::Error> {
        let query = format!(
            "INSERT INTO achievements
                (title, slug, description, icon_url, category, achievement_type,
                 target_value, xp_reward)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Achievement>(&query)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.icon_url)
            .bind(&input.category)
            .bind(&input.achievement_type)
            .bind(input.target_value)
            .bind(input.xp_reward)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Achievement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM achievements WHERE id = $1");
        sqlx::query_as::<_, Achievement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn slug_exists(
        pool: &PgPool,
        slug: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM achievements WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// Catalog ordered by reward, optionally limited to one category.
    pub async fn list(pool: &PgPool, category: Option<&str>) -> Result<Vec<Achievement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM achievements
             WHERE ($1::TEXT IS NULL OR category = $1)
             ORDER BY xp_reward ASC, id ASC"
        );
        sqlx::query_as::<_, Achievement>(&query)
            .bind(category)
            .fetch_all(pool)
            .await
    }

    /// Catalog entries of the given types, for unlock checks.
    pub async fn list_by_types<'e, E>(
        executor: E,
        types: &[&str],
    ) -> Result<Vec<Achievement>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let types: Vec<String> = types.iter().map(|t| t.to_string()).collect();
        let query = format!(
            "SELECT {COLUMNS} FROM achievements
             WHERE achievement_type = ANY($1)
             ORDER BY target_value ASC, id ASC"
        );
        sqlx::query_as::<_, Achievement>(&query)
            .bind(types)
            .fetch_all(executor)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAchievement,
    ) -> Result<Option<Achievement>, sqlx::Error> {
        let query = format!(
            "UPDATE achievements SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                icon_url = COALESCE($5, icon_url),
                category = COALESCE($6, category),
                achievement_type = COALESCE($7, achievement_type),
                target_value = COALESCE($8, target_value),
                xp_reward = COALESCE($9, xp_reward)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Achievement>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.icon_url)
            .bind(&input.category)
            .bind(&input.achievement_type)
            .bind(input.target_value)
            .bind(input.xp_reward)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM achievements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Provides grant/revoke operations for user achievements.
pub struct UserAchievementRepo;

impl UserAchievementRepo {
    /// Insert a grant unless the user already owns it.
    ///
    /// Returns `None` when the grant already existed.
    pub async fn grant_if_missing<'e, E>(
        executor: E,
        user_id: DbId,
        achievement_id: DbId,
    ) -> Result<Option<UserAchievement>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO user_achievements (user_id, achievement_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_user_achievements_user_achievement DO NOTHING
             RETURNING {GRANT_COLUMNS}"
        );
        sqlx::query_as::<_, UserAchievement>(&query)
            .bind(user_id)
            .bind(achievement_id)
            .fetch_optional(executor)
            .await
    }

    pub async fn owned_ids<'e, E>(executor: E, user_id: DbId) -> Result<Vec<DbId>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, DbId>(
            "SELECT achievement_id FROM user_achievements WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(executor)
        .await
    }

    /// A user's grants with catalog details, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<UserAchievementDetail>, sqlx::Error> {
        sqlx::query_as::<_, UserAchievementDetail>(
            "SELECT ua.id, ua.user_id, ua.achievement_id, ua.unlocked_at,
                    a.title, a.slug, a.description, a.icon_url, a.category, a.xp_reward
             FROM user_achievements ua
             JOIN achievements a ON a.id = ua.achievement_id
             WHERE ua.user_id = $1
             ORDER BY ua.unlocked_at DESC, ua.id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Revoke a grant by its ID.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_achievements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
