//! Course enrollments.

use axum::extract::State;
use lisan_core::progress::{resolve_enrollment_patch, validate_enrollment_status};
use lisan_core::search::like_pattern;
use lisan_core::types::DbId;
use lisan_db::models::enrollment::{
    CourseEnrollmentStat, Enrollment, EnrollmentFilter, EnrollmentWithCourse, UserEnrollmentStat,
};
use lisan_db::repositories::{CourseRepo, EnrollmentRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PageParams;
use crate::response::{ApiResponse, Paginated};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    pub course_id: DbId,
    pub used_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EnrollmentListParams {
    pub status: Option<String>,
    pub user_id: Option<DbId>,
    pub course_id: Option<DbId>,
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatusParams {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckParams {
    pub course_id: DbId,
}

#[derive(Debug, Serialize)]
pub struct EnrollmentCheck {
    pub is_enrolled: bool,
    pub status: Option<String>,
    pub enrollment: Option<Enrollment>,
}

#[derive(Debug, Deserialize)]
pub struct PatchEnrollmentRequest {
    pub status: Option<String>,
    pub progress_percentage: Option<i32>,
}

// ---------------------------------------------------------------------------
// Learner
// ---------------------------------------------------------------------------

/// POST /api/v1/enrollments
pub async fn enroll(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<EnrollRequest>,
) -> AppResult<ApiResponse<Enrollment>> {
    if CourseRepo::find_by_id(&state.pool, input.course_id).await?.is_none() {
        return Err(AppError::not_found("Course", input.course_id));
    }
    if EnrollmentRepo::find_by_user_course(&state.pool, auth.user_id, input.course_id)
        .await?
        .is_some()
    {
        return Err(AppError::conflict("Already enrolled in this course"));
    }

    let used_key = input
        .used_key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty());
    let enrollment =
        EnrollmentRepo::create(&state.pool, auth.user_id, input.course_id, used_key).await?;

    tracing::info!(
        user_id = auth.user_id,
        course_id = input.course_id,
        enrollment_id = enrollment.id,
        "User enrolled",
    );
    Ok(ApiResponse::created("Enrolled successfully", enrollment))
}

/// GET /api/v1/enrollments/me
pub async fn my_enrollments(
    auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<StatusParams>,
) -> AppResult<ApiResponse<Vec<EnrollmentWithCourse>>> {
    if let Some(status) = params.status.as_deref() {
        validate_enrollment_status(status)?;
    }
    let rows =
        EnrollmentRepo::list_for_user(&state.pool, auth.user_id, params.status.as_deref()).await?;
    Ok(ApiResponse::ok("Enrollments retrieved", rows))
}

/// GET /api/v1/enrollments/check?course_id=
pub async fn check_enrollment(
    auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<CheckParams>,
) -> AppResult<ApiResponse<EnrollmentCheck>> {
    let enrollment =
        EnrollmentRepo::find_by_user_course(&state.pool, auth.user_id, params.course_id).await?;
    let check = EnrollmentCheck {
        is_enrolled: enrollment.is_some(),
        status: enrollment.as_ref().map(|e| e.status.clone()),
        enrollment,
    };
    Ok(ApiResponse::ok("Enrollment status retrieved", check))
}

/// GET /api/v1/enrollments/{id}
pub async fn get_enrollment(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<Enrollment>> {
    let enrollment = EnrollmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Enrollment", id))?;
    auth.require_owner_or_admin(enrollment.user_id)?;
    Ok(ApiResponse::ok("Enrollment retrieved", enrollment))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /api/v1/enrollments
pub async fn list_enrollments(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageParams>,
    AppQuery(params): AppQuery<EnrollmentListParams>,
) -> AppResult<ApiResponse<Paginated<Enrollment>>> {
    let page = page.to_request()?;
    if let Some(status) = params.status.as_deref() {
        validate_enrollment_status(status)?;
    }
    let filter = EnrollmentFilter {
        status: params.status,
        user_id: params.user_id,
        course_id: params.course_id,
        search: like_pattern(params.search.as_deref()),
    };

    let rows = EnrollmentRepo::list(&state.pool, &filter, &page).await?;
    let total = EnrollmentRepo::count(&state.pool, &filter).await?;
    Ok(ApiResponse::ok(
        "Enrollments retrieved",
        Paginated::new(rows, &page, total),
    ))
}

/// GET /api/v1/enrollments/stats/courses
pub async fn course_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<CourseEnrollmentStat>>> {
    let stats = EnrollmentRepo::course_stats(&state.pool).await?;
    Ok(ApiResponse::ok("Course enrollment statistics retrieved", stats))
}

/// GET /api/v1/enrollments/stats/users
pub async fn user_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<UserEnrollmentStat>>> {
    let stats = EnrollmentRepo::user_stats(&state.pool).await?;
    Ok(ApiResponse::ok("User enrollment statistics retrieved", stats))
}

/// PATCH /api/v1/enrollments/{id}
pub async fn patch_enrollment(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<PatchEnrollmentRequest>,
) -> AppResult<ApiResponse<Enrollment>> {
    let patch = resolve_enrollment_patch(input.status.as_deref(), input.progress_percentage)?;
    let enrollment = EnrollmentRepo::apply_patch(&state.pool, id, &patch)
        .await?
        .ok_or_else(|| AppError::not_found("Enrollment", id))?;

    tracing::info!(
        enrollment_id = id,
        admin_id = admin.user_id,
        status = %enrollment.status,
        progress = enrollment.progress_percentage,
        "Enrollment updated",
    );
    Ok(ApiResponse::ok("Enrollment updated", enrollment))
}

/// DELETE /api/v1/enrollments/{id}
pub async fn delete_enrollment(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<()>> {
    if !EnrollmentRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Enrollment", id));
    }
    tracing::info!(enrollment_id = id, admin_id = admin.user_id, "Enrollment deleted");
    Ok(ApiResponse::message("Enrollment deleted"))
}
