//! Per-user dictionary progress.

use axum::extract::State;
use lisan_core::types::{DbId, Timestamp};
use lisan_db::models::learning::{
    DictionaryProgress, DictionaryProgressStats, DictionaryProgressWithDictionary,
};
use lisan_db::repositories::{DictionaryProgressRepo, DictionaryRepo};
use serde::{Deserialize, Serialize};

use crate::engine::dictionary::{reset_dictionary, set_item_completion, ItemCompletion};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ItemCompletionRequest {
    pub dictionary_item_id: DbId,
    pub is_completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    pub dictionary_id: DbId,
}

/// A user's standing in one dictionary. All zeros until they start it.
#[derive(Debug, Serialize)]
pub struct DictionaryProgressSummary {
    pub dictionary_id: DbId,
    pub completed_items: i32,
    pub total_items: i32,
    pub progress_percentage: i32,
    pub is_completed: bool,
    pub completed_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl DictionaryProgressSummary {
    fn not_started(dictionary_id: DbId) -> Self {
        Self {
            dictionary_id,
            completed_items: 0,
            total_items: 0,
            progress_percentage: 0,
            is_completed: false,
            completed_at: None,
            updated_at: None,
        }
    }
}

impl From<DictionaryProgress> for DictionaryProgressSummary {
    fn from(p: DictionaryProgress) -> Self {
        Self {
            dictionary_id: p.dictionary_id,
            completed_items: p.completed_items,
            total_items: p.total_items,
            progress_percentage: p.progress_percentage,
            is_completed: p.is_completed,
            completed_at: p.completed_at,
            updated_at: Some(p.updated_at),
        }
    }
}

/// POST /api/v1/dictionary-progress/items
pub async fn update_item(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<ItemCompletionRequest>,
) -> AppResult<ApiResponse<ItemCompletion>> {
    let outcome = set_item_completion(
        &state.pool,
        auth.user_id,
        input.dictionary_item_id,
        input.is_completed,
    )
    .await?;
    Ok(ApiResponse::ok("Item progress saved", outcome))
}

/// GET /api/v1/dictionary-progress
pub async fn list_progress(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<DictionaryProgressWithDictionary>>> {
    let rows = DictionaryProgressRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(ApiResponse::ok("Dictionary progress retrieved", rows))
}

/// GET /api/v1/dictionary-progress/stats
pub async fn stats(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<DictionaryProgressStats>> {
    let stats = DictionaryProgressRepo::stats(&state.pool, auth.user_id).await?;
    Ok(ApiResponse::ok("Dictionary progress statistics retrieved", stats))
}

/// GET /api/v1/dictionary-progress/{dictionary_id}
pub async fn get_progress(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(dictionary_id): AppPath<DbId>,
) -> AppResult<ApiResponse<DictionaryProgressSummary>> {
    if DictionaryRepo::find_by_id(&state.pool, dictionary_id)
        .await?
        .is_none()
    {
        return Err(AppError::not_found("Dictionary", dictionary_id));
    }
    let summary = DictionaryProgressRepo::find(&state.pool, auth.user_id, dictionary_id)
        .await?
        .map(DictionaryProgressSummary::from)
        .unwrap_or_else(|| DictionaryProgressSummary::not_started(dictionary_id));
    Ok(ApiResponse::ok("Dictionary progress retrieved", summary))
}

/// POST /api/v1/dictionary-progress/reset
pub async fn reset(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<ResetRequest>,
) -> AppResult<ApiResponse<()>> {
    let removed = reset_dictionary(&state.pool, auth.user_id, input.dictionary_id).await?;
    let message = if removed {
        "Dictionary progress reset"
    } else {
        "No progress to reset"
    };
    Ok(ApiResponse::message(message))
}
