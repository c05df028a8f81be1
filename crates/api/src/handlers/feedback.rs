//! User feedback and bug reports.

use axum::extract::State;
use lisan_core::support::{
    validate_feedback_message, validate_feedback_status, validate_feedback_type,
    DEFAULT_FEEDBACK_TYPE,
};
use lisan_core::types::DbId;
use lisan_db::models::feedback::{
    CreateFeedback, Feedback, FeedbackFilter, FeedbackWithUser, UpdateFeedback,
};
use lisan_db::repositories::FeedbackRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PageParams;
use crate::response::{ApiResponse, Paginated};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitFeedbackRequest {
    #[serde(rename = "type")]
    pub feedback_type: Option<String>,
    pub message: String,
    pub screenshot_url: Option<String>,
    pub app_version: Option<String>,
    pub device_info: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedbackListParams {
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub feedback_type: Option<String>,
}

/// POST /api/v1/feedback
pub async fn submit_feedback(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<SubmitFeedbackRequest>,
) -> AppResult<ApiResponse<Feedback>> {
    validate_feedback_message(&input.message)?;
    let feedback_type = input
        .feedback_type
        .unwrap_or_else(|| DEFAULT_FEEDBACK_TYPE.to_string());
    validate_feedback_type(&feedback_type)?;

    let feedback = FeedbackRepo::create(
        &state.pool,
        &CreateFeedback {
            user_id: Some(auth.user_id),
            feedback_type,
            message: input.message.trim().to_string(),
            screenshot_url: input.screenshot_url,
            app_version: input.app_version,
            device_info: input.device_info,
        },
    )
    .await?;

    tracing::info!(feedback_id = feedback.id, user_id = auth.user_id, "Feedback submitted");
    Ok(ApiResponse::created("Feedback submitted", feedback))
}

/// GET /api/v1/feedback
pub async fn list_feedback(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageParams>,
    AppQuery(params): AppQuery<FeedbackListParams>,
) -> AppResult<ApiResponse<Paginated<FeedbackWithUser>>> {
    let page = page.to_request()?;
    if let Some(status) = params.status.as_deref() {
        validate_feedback_status(status)?;
    }
    if let Some(kind) = params.feedback_type.as_deref() {
        validate_feedback_type(kind)?;
    }
    let filter = FeedbackFilter {
        status: params.status,
        feedback_type: params.feedback_type,
    };

    let rows = FeedbackRepo::list(&state.pool, &filter, &page).await?;
    let total = FeedbackRepo::count(&state.pool, &filter).await?;
    Ok(ApiResponse::ok(
        "Feedback retrieved",
        Paginated::new(rows, &page, total),
    ))
}

/// GET /api/v1/feedback/{id}
pub async fn get_feedback(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<FeedbackWithUser>> {
    let feedback = FeedbackRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Feedback", id))?;
    Ok(ApiResponse::ok("Feedback retrieved", feedback))
}

/// PUT /api/v1/feedback/{id}
pub async fn update_feedback(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateFeedback>,
) -> AppResult<ApiResponse<Feedback>> {
    if input.status.is_none() && input.admin_notes.is_none() {
        return Err(AppError::BadRequest("No fields to update".into()));
    }
    if let Some(status) = input.status.as_deref() {
        validate_feedback_status(status)?;
    }

    let feedback = FeedbackRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Feedback", id))?;
    tracing::info!(
        feedback_id = id,
        admin_id = admin.user_id,
        status = %feedback.status,
        "Feedback updated",
    );
    Ok(ApiResponse::ok("Feedback updated", feedback))
}

/// DELETE /api/v1/feedback/{id}
pub async fn delete_feedback(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<()>> {
    if !FeedbackRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Feedback", id));
    }
    tracing::info!(feedback_id = id, admin_id = admin.user_id, "Feedback deleted");
    Ok(ApiResponse::message("Feedback deleted"))
}
