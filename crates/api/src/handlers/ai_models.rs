//! Recognition model registry.

use axum::extract::State;
use lisan_core::types::DbId;
use lisan_core::validation::{reject_blank, require_text};
use lisan_db::models::ai_model::{AiModel, AiModelWithItems, CreateAiModel, UpdateAiModel};
use lisan_db::repositories::AiModelRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/ai-models
pub async fn list_models(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<AiModelWithItems>>> {
    let models = AiModelRepo::list_with_items(&state.pool).await?;
    Ok(ApiResponse::ok("AI models retrieved", models))
}

/// GET /api/v1/ai-models/{id}
pub async fn get_model(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<AiModelWithItems>> {
    let model = AiModelRepo::find_with_items(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("AiModel", id))?;
    Ok(ApiResponse::ok("AI model retrieved", model))
}

/// POST /api/v1/ai-models
pub async fn create_model(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(mut input): AppJson<CreateAiModel>,
) -> AppResult<ApiResponse<AiModel>> {
    input.model_url = require_text("model_url", &input.model_url)?.to_string();

    let model = AiModelRepo::create(&state.pool, &input).await?;
    tracing::info!(model_id = model.id, admin_id = admin.user_id, "AI model registered");
    Ok(ApiResponse::created("AI model created", model))
}

/// PUT /api/v1/ai-models/{id}
pub async fn update_model(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateAiModel>,
) -> AppResult<ApiResponse<AiModel>> {
    reject_blank("model_url", input.model_url.as_deref())?;

    let model = AiModelRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("AiModel", id))?;
    tracing::info!(model_id = id, admin_id = admin.user_id, "AI model updated");
    Ok(ApiResponse::ok("AI model updated", model))
}

/// DELETE /api/v1/ai-models/{id}
///
/// Refused while any dictionary item still points at the model.
pub async fn delete_model(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<()>> {
    if AiModelRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::not_found("AiModel", id));
    }
    let users = AiModelRepo::usage(&state.pool, Some(id)).await?;
    if !users.is_empty() {
        let words: Vec<&str> = users.iter().map(|u| u.word.as_str()).collect();
        return Err(AppError::BadRequest(format!(
            "AI model is still used by {} dictionary item(s): {}",
            users.len(),
            words.join(", ")
        )));
    }

    AiModelRepo::delete(&state.pool, id).await?;
    tracing::info!(model_id = id, admin_id = admin.user_id, "AI model deleted");
    Ok(ApiResponse::message("AI model deleted"))
}
