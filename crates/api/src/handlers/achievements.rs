//! Achievement catalog and user grants.

use axum::extract::State;
use lisan_core::achievements::{
    validate_category, AchievementType, DEFAULT_CATEGORY, DEFAULT_TARGET_VALUE, DEFAULT_TYPE,
    DEFAULT_XP_REWARD,
};
use lisan_core::slug::slugify;
use lisan_core::types::DbId;
use lisan_core::validation::{reject_blank, require_non_negative, require_text};
use lisan_db::models::achievement::{
    Achievement, CreateAchievement, UpdateAchievement, UserAchievement, UserAchievementDetail,
};
use lisan_db::repositories::{AchievementRepo, UserAchievementRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct CategoryParams {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateAchievementRequest {
    pub title: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub achievement_type: Option<String>,
    pub target_value: Option<i64>,
    pub xp_reward: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAchievementRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub achievement_type: Option<String>,
    pub target_value: Option<i64>,
    pub xp_reward: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct GrantRequest {
    pub user_id: DbId,
    pub achievement_id: DbId,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn unique_slug(state: &AppState, title: &str, exclude_id: Option<DbId>) -> AppResult<String> {
    let slug = slugify(title)?;
    if AchievementRepo::slug_exists(&state.pool, &slug, exclude_id).await? {
        return Err(AppError::conflict(format!(
            "An achievement with slug '{slug}' already exists"
        )));
    }
    Ok(slug)
}

fn validate_numbers(target_value: Option<i64>, xp_reward: Option<i32>) -> AppResult<()> {
    if let Some(target) = target_value {
        require_non_negative("target_value", target)?;
    }
    if let Some(xp) = xp_reward {
        require_non_negative("xp_reward", i64::from(xp))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// POST /api/v1/achievements
pub async fn create_achievement(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateAchievementRequest>,
) -> AppResult<ApiResponse<Achievement>> {
    let title = require_text("title", &input.title)?.to_string();
    let category = input.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
    validate_category(&category)?;
    let achievement_type = input
        .achievement_type
        .unwrap_or_else(|| DEFAULT_TYPE.to_string());
    AchievementType::from_str_value(&achievement_type)?;
    validate_numbers(input.target_value, input.xp_reward)?;

    let slug = unique_slug(&state, &title, None).await?;
    let achievement = AchievementRepo::create(
        &state.pool,
        &CreateAchievement {
            title,
            slug,
            description: input.description,
            icon_url: input.icon_url,
            category,
            achievement_type,
            target_value: input.target_value.unwrap_or(DEFAULT_TARGET_VALUE),
            xp_reward: input.xp_reward.unwrap_or(DEFAULT_XP_REWARD),
        },
    )
    .await?;

    tracing::info!(achievement_id = achievement.id, admin_id = admin.user_id, "Achievement created");
    Ok(ApiResponse::created("Achievement created", achievement))
}

/// GET /api/v1/achievements
pub async fn list_achievements(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<CategoryParams>,
) -> AppResult<ApiResponse<Vec<Achievement>>> {
    let rows = AchievementRepo::list(&state.pool, params.category.as_deref()).await?;
    Ok(ApiResponse::ok("Achievements retrieved", rows))
}

/// GET /api/v1/achievements/{id}
pub async fn get_achievement(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<Achievement>> {
    let achievement = AchievementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Achievement", id))?;
    Ok(ApiResponse::ok("Achievement retrieved", achievement))
}

/// PUT /api/v1/achievements/{id}
pub async fn update_achievement(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateAchievementRequest>,
) -> AppResult<ApiResponse<Achievement>> {
    reject_blank("title", input.title.as_deref())?;
    if let Some(category) = input.category.as_deref() {
        validate_category(category)?;
    }
    if let Some(kind) = input.achievement_type.as_deref() {
        AchievementType::from_str_value(kind)?;
    }
    validate_numbers(input.target_value, input.xp_reward)?;

    let (title, slug) = match input.title.as_deref() {
        Some(title) => {
            let title = title.trim().to_string();
            let slug = unique_slug(&state, &title, Some(id)).await?;
            (Some(title), Some(slug))
        }
        None => (None, None),
    };

    let achievement = AchievementRepo::update(
        &state.pool,
        id,
        &UpdateAchievement {
            title,
            slug,
            description: input.description,
            icon_url: input.icon_url,
            category: input.category,
            achievement_type: input.achievement_type,
            target_value: input.target_value,
            xp_reward: input.xp_reward,
        },
    )
    .await?
    .ok_or_else(|| AppError::not_found("Achievement", id))?;

    tracing::info!(achievement_id = id, admin_id = admin.user_id, "Achievement updated");
    Ok(ApiResponse::ok("Achievement updated", achievement))
}

/// DELETE /api/v1/achievements/{id}
pub async fn delete_achievement(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<()>> {
    if !AchievementRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Achievement", id));
    }
    tracing::info!(achievement_id = id, admin_id = admin.user_id, "Achievement deleted");
    Ok(ApiResponse::message("Achievement deleted"))
}

// ---------------------------------------------------------------------------
// Grants
// ---------------------------------------------------------------------------

/// POST /api/v1/achievements/grant
///
/// The achievement's `xp_reward` is shown to the user but not credited.
pub async fn grant(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<GrantRequest>,
) -> AppResult<ApiResponse<UserAchievement>> {
    if UserRepo::find_by_id(&state.pool, input.user_id).await?.is_none() {
        return Err(AppError::not_found("User", input.user_id));
    }
    if AchievementRepo::find_by_id(&state.pool, input.achievement_id)
        .await?
        .is_none()
    {
        return Err(AppError::not_found("Achievement", input.achievement_id));
    }

    let granted =
        UserAchievementRepo::grant_if_missing(&state.pool, input.user_id, input.achievement_id)
            .await?
            .ok_or_else(|| AppError::conflict("User already has this achievement"))?;

    tracing::info!(
        user_id = input.user_id,
        achievement_id = input.achievement_id,
        admin_id = admin.user_id,
        "Achievement granted",
    );
    Ok(ApiResponse::created("Achievement granted", granted))
}

/// GET /api/v1/achievements/me
pub async fn my_achievements(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<UserAchievementDetail>>> {
    let rows = UserAchievementRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(ApiResponse::ok("Achievements retrieved", rows))
}

/// GET /api/v1/achievements/users/{user_id}
pub async fn user_achievements(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(user_id): AppPath<DbId>,
) -> AppResult<ApiResponse<Vec<UserAchievementDetail>>> {
    let rows = UserAchievementRepo::list_for_user(&state.pool, user_id).await?;
    Ok(ApiResponse::ok("Achievements retrieved", rows))
}

/// DELETE /api/v1/achievements/revoke/{id}
///
/// `id` is the `user_achievements` row, not the catalog entry.
pub async fn revoke(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<()>> {
    if !UserAchievementRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("UserAchievement", id));
    }
    tracing::info!(user_achievement_id = id, admin_id = admin.user_id, "Achievement revoked");
    Ok(ApiResponse::message("Achievement revoked"))
}
