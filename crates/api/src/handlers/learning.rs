//! Spaced-repetition quiz path.

use axum::extract::State;
use lisan_db::models::learning::DueItem;
use lisan_db::repositories::{ItemProgressRepo, StreakRepo, UserRepo};
use serde::Serialize;

use crate::engine::learning::{submit_quiz, QuizOutcome, QuizSubmission};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::query::LimitParams;
use crate::response::ApiResponse;
use crate::state::AppState;

const DEFAULT_DUE_LIMIT: i64 = 10;
const MAX_DUE_LIMIT: i64 = 100;

#[derive(Debug, Serialize)]
pub struct LearningStats {
    pub level: i32,
    pub xp: i64,
    pub total_xp: i64,
    pub items_learned: i64,
    pub current_streak: i32,
    pub longest_streak: i32,
}

/// GET /api/v1/learning/due
pub async fn due_items(
    auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<LimitParams>,
) -> AppResult<ApiResponse<Vec<DueItem>>> {
    let limit = params.clamped(DEFAULT_DUE_LIMIT, MAX_DUE_LIMIT);
    let items = ItemProgressRepo::due_items(&state.pool, auth.user_id, limit).await?;
    Ok(ApiResponse::ok("Due items retrieved", items))
}

/// POST /api/v1/learning/submit
pub async fn submit(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<QuizSubmission>,
) -> AppResult<ApiResponse<QuizOutcome>> {
    let outcome = submit_quiz(&state.pool, auth.user_id, &input).await?;
    let message = if outcome.is_level_up {
        format!("Answer recorded. Level up to {}", outcome.new_level)
    } else {
        "Answer recorded".to_string()
    };
    Ok(ApiResponse::ok(message, outcome))
}

/// GET /api/v1/learning/stats
pub async fn stats(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<LearningStats>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User", auth.user_id))?;
    let items_learned = ItemProgressRepo::count_completed(&state.pool, auth.user_id).await?;
    let (current_streak, longest_streak) = StreakRepo::find_by_user(&state.pool, auth.user_id)
        .await?
        .map(|s| (s.current_streak, s.longest_streak))
        .unwrap_or((0, 0));

    Ok(ApiResponse::ok(
        "Learning statistics retrieved",
        LearningStats {
            level: user.level,
            xp: user.xp,
            total_xp: user.total_xp,
            items_learned,
            current_streak,
            longest_streak,
        },
    ))
}
