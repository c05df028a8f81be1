//! Multiple-choice quiz questions attached to dictionary items.

use axum::extract::State;
use lisan_core::content::validate_quiz_options;
use lisan_core::types::DbId;
use lisan_core::validation::require_text;
use lisan_db::models::quiz::{CreateQuizQuestion, QuizQuestion};
use lisan_db::repositories::{DictionaryItemRepo, QuizQuestionRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateQuizRequest {
    pub dictionary_item_id: DbId,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

/// POST /api/v1/quizzes
pub async fn create_quiz(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateQuizRequest>,
) -> AppResult<ApiResponse<QuizQuestion>> {
    let question = require_text("question", &input.question)?.to_string();
    validate_quiz_options(&input.options, &input.correct_answer)?;
    if DictionaryItemRepo::find_by_id(&state.pool, input.dictionary_item_id)
        .await?
        .is_none()
    {
        return Err(AppError::not_found("DictionaryItem", input.dictionary_item_id));
    }

    let quiz = QuizQuestionRepo::create(
        &state.pool,
        &CreateQuizQuestion {
            dictionary_item_id: input.dictionary_item_id,
            question,
            options: input.options,
            correct_answer: input.correct_answer,
        },
    )
    .await?;

    tracing::info!(quiz_id = quiz.id, admin_id = admin.user_id, "Quiz question created");
    Ok(ApiResponse::created("Quiz question created", quiz))
}

/// GET /api/v1/quizzes/item/{item_id}
pub async fn list_for_item(
    State(state): State<AppState>,
    AppPath(item_id): AppPath<DbId>,
) -> AppResult<ApiResponse<Vec<QuizQuestion>>> {
    let quizzes = QuizQuestionRepo::list_by_item(&state.pool, item_id).await?;
    Ok(ApiResponse::ok("Quiz questions retrieved", quizzes))
}

/// DELETE /api/v1/quizzes/{id}
pub async fn delete_quiz(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<()>> {
    if !QuizQuestionRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("QuizQuestion", id));
    }
    tracing::info!(quiz_id = id, admin_id = admin.user_id, "Quiz question deleted");
    Ok(ApiResponse::message("Quiz question deleted"))
}
