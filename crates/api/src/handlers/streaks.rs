//! Daily learning streaks.

use axum::extract::State;
use lisan_core::types::{Date, DbId};
use lisan_core::validation::require_non_negative;
use lisan_db::models::streak::{StreakWithUser, UpdateStreak, UserStreak};
use lisan_db::repositories::StreakRepo;
use serde::Serialize;

use crate::engine::streak::{hit, StreakHit};
use crate::engine::today;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PageParams;
use crate::response::{ApiResponse, Paginated};
use crate::state::AppState;

/// Public view of someone's streak; zeros when they have never been active.
#[derive(Debug, Serialize)]
pub struct StreakSummary {
    pub user_id: DbId,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_activity_date: Option<Date>,
    pub freeze_count: i32,
}

impl StreakSummary {
    fn empty(user_id: DbId) -> Self {
        Self {
            user_id,
            current_streak: 0,
            longest_streak: 0,
            last_activity_date: None,
            freeze_count: 0,
        }
    }
}

impl From<UserStreak> for StreakSummary {
    fn from(s: UserStreak) -> Self {
        Self {
            user_id: s.user_id,
            current_streak: s.current_streak,
            longest_streak: s.longest_streak,
            last_activity_date: s.last_activity_date,
            freeze_count: s.freeze_count,
        }
    }
}

/// GET /api/v1/streaks/me
pub async fn my_streak(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<UserStreak>> {
    let streak = StreakRepo::get_or_create(&state.pool, auth.user_id).await?;
    Ok(ApiResponse::ok("Streak retrieved", streak))
}

/// POST /api/v1/streaks/hit
pub async fn hit_streak(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<StreakHit>> {
    let outcome = hit(&state.pool, auth.user_id, today()).await?;
    Ok(ApiResponse::ok("Streak updated", outcome))
}

/// GET /api/v1/streaks/users/{user_id}
pub async fn user_streak(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(user_id): AppPath<DbId>,
) -> AppResult<ApiResponse<StreakSummary>> {
    let summary = StreakRepo::find_by_user(&state.pool, user_id)
        .await?
        .map(StreakSummary::from)
        .unwrap_or_else(|| StreakSummary::empty(user_id));
    Ok(ApiResponse::ok("Streak retrieved", summary))
}

/// GET /api/v1/streaks
pub async fn list_streaks(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageParams>,
) -> AppResult<ApiResponse<Paginated<StreakWithUser>>> {
    let page = page.to_request()?;
    let rows = StreakRepo::list(&state.pool, &page).await?;
    let total = StreakRepo::count(&state.pool).await?;
    Ok(ApiResponse::ok(
        "Streaks retrieved",
        Paginated::new(rows, &page, total),
    ))
}

/// PUT /api/v1/streaks/{id}
pub async fn update_streak(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateStreak>,
) -> AppResult<ApiResponse<UserStreak>> {
    for (field, value) in [
        ("current_streak", input.current_streak),
        ("longest_streak", input.longest_streak),
        ("freeze_count", input.freeze_count),
    ] {
        if let Some(v) = value {
            require_non_negative(field, i64::from(v))?;
        }
    }

    let streak = StreakRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Streak", id))?;
    tracing::info!(streak_id = id, admin_id = admin.user_id, "Streak updated by admin");
    Ok(ApiResponse::ok("Streak updated", streak))
}

/// DELETE /api/v1/streaks/{id}
pub async fn delete_streak(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<()>> {
    if !StreakRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Streak", id));
    }
    tracing::info!(streak_id = id, admin_id = admin.user_id, "Streak deleted");
    Ok(ApiResponse::message("Streak deleted"))
}
