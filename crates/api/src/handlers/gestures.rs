//! Gesture recognition telemetry.

use axum::extract::State;
use lisan_core::types::DbId;
use lisan_core::validation::require_text;
use lisan_db::models::learning::{CreateGestureLog, GestureLog};
use lisan_db::repositories::{DictionaryItemRepo, GestureLogRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GestureLogRequest {
    pub dictionary_item_id: Option<DbId>,
    pub detected_label: String,
    pub expected_label: Option<String>,
    pub accuracy_score: Option<f64>,
    pub device_info: Option<String>,
}

/// POST /api/v1/gestures/logs
pub async fn create_log(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<GestureLogRequest>,
) -> AppResult<ApiResponse<GestureLog>> {
    let detected_label = require_text("detected_label", &input.detected_label)?.to_string();
    if let Some(score) = input.accuracy_score {
        if !(0.0..=1.0).contains(&score) {
            return Err(AppError::BadRequest(
                "accuracy_score must be between 0 and 1".into(),
            ));
        }
    }
    if let Some(item_id) = input.dictionary_item_id {
        if DictionaryItemRepo::find_by_id(&state.pool, item_id).await?.is_none() {
            return Err(AppError::not_found("DictionaryItem", item_id));
        }
    }

    let log = GestureLogRepo::create(
        &state.pool,
        &CreateGestureLog {
            user_id: auth.user_id,
            dictionary_item_id: input.dictionary_item_id,
            detected_label,
            expected_label: input.expected_label,
            accuracy_score: input.accuracy_score,
            device_info: input.device_info,
        },
    )
    .await?;

    tracing::debug!(user_id = auth.user_id, log_id = log.id, "Gesture log recorded");
    Ok(ApiResponse::created("Gesture log recorded", log))
}
