//! Daily quests.

use axum::extract::State;
use lisan_core::gamification::XpGrant;
use lisan_core::quests::validate_action;
use lisan_core::types::DbId;
use lisan_core::validation::{require_non_negative, require_text};
use lisan_db::models::quest::{CreateDailyQuest, DailyQuest, UserQuestDetail};
use lisan_db::repositories::QuestRepo;
use serde::Deserialize;

use crate::engine::quests::{claim, daily};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateQuestRequest {
    pub title: String,
    pub description: Option<String>,
    pub action_type: String,
    pub target_count: i32,
    pub xp_reward: i32,
}

/// GET /api/v1/quests/daily
pub async fn daily_quests(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<UserQuestDetail>>> {
    let quests = daily(&state.pool, auth.user_id).await?;
    Ok(ApiResponse::ok("Daily quests retrieved", quests))
}

/// POST /api/v1/quests/{user_quest_id}/claim
pub async fn claim_reward(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(user_quest_id): AppPath<DbId>,
) -> AppResult<ApiResponse<XpGrant>> {
    let grant = claim(&state.pool, auth.user_id, user_quest_id).await?;
    Ok(ApiResponse::ok("Quest reward claimed", grant))
}

/// POST /api/v1/quests
pub async fn create_quest(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateQuestRequest>,
) -> AppResult<ApiResponse<DailyQuest>> {
    let title = require_text("title", &input.title)?.to_string();
    validate_action(&input.action_type)?;
    if input.target_count < 1 {
        return Err(AppError::BadRequest(format!(
            "target_count must be at least 1 (got {})",
            input.target_count
        )));
    }
    require_non_negative("xp_reward", i64::from(input.xp_reward))?;

    let quest = QuestRepo::create(
        &state.pool,
        &CreateDailyQuest {
            title,
            description: input.description,
            action_type: input.action_type,
            target_count: input.target_count,
            xp_reward: input.xp_reward,
        },
    )
    .await?;

    tracing::info!(quest_id = quest.id, admin_id = admin.user_id, "Daily quest created");
    Ok(ApiResponse::created("Daily quest created", quest))
}
