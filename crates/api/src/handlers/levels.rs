//! Level boundaries and per-user level progress.

use axum::extract::State;
use lisan_core::gamification::{next_level_progress, LevelProgress};
use lisan_core::validation::require_non_negative;
use lisan_db::models::level::LevelBoundary;
use lisan_db::repositories::{LevelBoundaryRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LookupParams {
    pub total_xp: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpsertLevelRequest {
    pub min_xp: i64,
}

#[derive(Debug, Serialize)]
pub struct UserLevelProgress {
    pub xp: i64,
    pub total_xp: i64,
    #[serde(flatten)]
    pub progress: LevelProgress,
}

/// GET /api/v1/levels
pub async fn list_levels(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<LevelBoundary>>> {
    let levels = LevelBoundaryRepo::list(&state.pool).await?;
    Ok(ApiResponse::ok("Level boundaries retrieved", levels))
}

/// GET /api/v1/levels/lookup?total_xp=
pub async fn lookup_level(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<LookupParams>,
) -> AppResult<ApiResponse<LevelBoundary>> {
    require_non_negative("total_xp", params.total_xp)?;
    let boundary = LevelBoundaryRepo::lookup(&state.pool, params.total_xp)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("No level boundary covers {} XP", params.total_xp))
        })?;
    Ok(ApiResponse::ok("Level retrieved", boundary))
}

/// PUT /api/v1/levels/{level}
pub async fn upsert_level(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(level): AppPath<i32>,
    AppJson(input): AppJson<UpsertLevelRequest>,
) -> AppResult<ApiResponse<LevelBoundary>> {
    if level < 1 {
        return Err(AppError::BadRequest(format!("level must be at least 1 (got {level})")));
    }
    require_non_negative("min_xp", input.min_xp)?;

    let boundary = LevelBoundaryRepo::upsert(&state.pool, level, input.min_xp).await?;
    tracing::info!(level, min_xp = input.min_xp, admin_id = admin.user_id, "Level boundary saved");
    Ok(ApiResponse::ok("Level boundary saved", boundary))
}

/// GET /api/v1/levels/progress
pub async fn my_progress(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<UserLevelProgress>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User", auth.user_id))?;
    Ok(ApiResponse::ok(
        "Level progress retrieved",
        UserLevelProgress {
            xp: user.xp,
            total_xp: user.total_xp,
            progress: next_level_progress(user.total_xp),
        },
    ))
}
