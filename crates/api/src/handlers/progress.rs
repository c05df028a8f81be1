//! Course progress: lesson completion, per-course views and the learner
//! dashboard.

use axum::extract::State;
use lisan_core::types::DbId;
use lisan_db::models::enrollment::Enrollment;
use lisan_db::models::progress::LessonProgress;
use lisan_db::repositories::{
    DictionaryProgressRepo, EnrollmentRepo, ItemProgressRepo, LessonProgressRepo, StreakRepo,
    UserRepo,
};
use serde::{Deserialize, Serialize};

use crate::engine::rollup::{
    record_lesson_progress, recompute_for_user, reset_course_progress, LessonProgressInput,
    LessonProgressOutcome, RecomputeOutcome, ResetOutcome,
};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CourseProgress {
    pub enrollment: Option<Enrollment>,
    pub lessons: Vec<LessonProgress>,
}

#[derive(Debug, Deserialize)]
pub struct RecomputeRequest {
    pub user_id: DbId,
}

#[derive(Debug, Serialize)]
pub struct DashboardUser {
    pub xp: i64,
    pub total_xp: i64,
    pub level: i32,
}

#[derive(Debug, Serialize)]
pub struct DashboardLearning {
    pub words_learned: i64,
    pub dictionaries_completed: i64,
    pub current_streak: i32,
    pub longest_streak: i32,
}

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub user: DashboardUser,
    pub learning: DashboardLearning,
}

/// POST /api/v1/progress/lessons
pub async fn update_lesson_progress(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<LessonProgressInput>,
) -> AppResult<ApiResponse<LessonProgressOutcome>> {
    let outcome = record_lesson_progress(&state.pool, auth.user_id, &input).await?;
    let message = if outcome.newly_completed {
        "Lesson completed"
    } else {
        "Lesson progress saved"
    };
    Ok(ApiResponse::ok(message, outcome))
}

/// GET /api/v1/progress/courses/{course_id}
pub async fn course_progress(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(course_id): AppPath<DbId>,
) -> AppResult<ApiResponse<CourseProgress>> {
    let enrollment =
        EnrollmentRepo::find_by_user_course(&state.pool, auth.user_id, course_id).await?;
    let lessons = LessonProgressRepo::list_for_course(&state.pool, auth.user_id, course_id).await?;
    Ok(ApiResponse::ok(
        "Course progress retrieved",
        CourseProgress {
            enrollment,
            lessons,
        },
    ))
}

/// POST /api/v1/progress/courses/{course_id}/recompute
pub async fn recompute_course(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(course_id): AppPath<DbId>,
    AppJson(input): AppJson<RecomputeRequest>,
) -> AppResult<ApiResponse<RecomputeOutcome>> {
    if UserRepo::find_by_id(&state.pool, input.user_id).await?.is_none() {
        return Err(AppError::not_found("User", input.user_id));
    }
    let outcome = recompute_for_user(&state.pool, input.user_id, course_id).await?;
    tracing::info!(admin_id = admin.user_id, "Admin triggered progress recompute");
    Ok(ApiResponse::ok("Course progress recomputed", outcome))
}

/// DELETE /api/v1/progress/courses/{course_id}/users/{user_id}
pub async fn reset_course(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath((course_id, user_id)): AppPath<(DbId, DbId)>,
) -> AppResult<ApiResponse<ResetOutcome>> {
    let outcome = reset_course_progress(&state.pool, user_id, course_id).await?;
    tracing::info!(admin_id = admin.user_id, "Admin reset course progress");
    Ok(ApiResponse::ok("Course progress reset", outcome))
}

/// GET /api/v1/progress/dashboard
pub async fn dashboard(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Dashboard>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User", auth.user_id))?;
    let words_learned = ItemProgressRepo::count_completed(&state.pool, auth.user_id).await?;
    let dictionaries = DictionaryProgressRepo::stats(&state.pool, auth.user_id).await?;
    let streak = StreakRepo::find_by_user(&state.pool, auth.user_id).await?;

    let (current_streak, longest_streak) = streak
        .map(|s| (s.current_streak, s.longest_streak))
        .unwrap_or((0, 0));

    Ok(ApiResponse::ok(
        "Dashboard retrieved",
        Dashboard {
            user: DashboardUser {
                xp: user.xp,
                total_xp: user.total_xp,
                level: user.level,
            },
            learning: DashboardLearning {
                words_learned,
                dictionaries_completed: dictionaries.total_dictionaries_completed,
                current_streak,
                longest_streak,
            },
        },
    ))
}
