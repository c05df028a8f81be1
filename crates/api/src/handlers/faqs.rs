//! Frequently asked questions.

use axum::extract::State;
use lisan_core::search::like_pattern;
use lisan_core::support::validate_faq_category;
use lisan_core::types::DbId;
use lisan_core::validation::{reject_blank, require_text};
use lisan_db::models::faq::{CreateFaq, Faq, FaqFilter, UpdateFaq};
use lisan_db::repositories::FaqRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{PageParams, SortParams};
use crate::response::{ApiResponse, Paginated};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct FaqListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
}

/// GET /api/v1/faqs
pub async fn list_faqs(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageParams>,
    AppQuery(sort): AppQuery<SortParams>,
    AppQuery(params): AppQuery<FaqListParams>,
) -> AppResult<ApiResponse<Paginated<Faq>>> {
    let page = page.to_request()?;
    let filter = FaqFilter {
        search: like_pattern(params.search.as_deref()),
        category: params.category,
        is_active: params.is_active,
    };

    let rows = FaqRepo::list(
        &state.pool,
        &filter,
        sort.sort_by.as_deref(),
        sort.order(),
        &page,
    )
    .await?;
    let total = FaqRepo::count(&state.pool, &filter).await?;
    Ok(ApiResponse::ok("FAQs retrieved", Paginated::new(rows, &page, total)))
}

/// GET /api/v1/faqs/{id}
pub async fn get_faq(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<Faq>> {
    let faq = FaqRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Faq", id))?;
    Ok(ApiResponse::ok("FAQ retrieved", faq))
}

/// POST /api/v1/faqs
pub async fn create_faq(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(mut input): AppJson<CreateFaq>,
) -> AppResult<ApiResponse<Faq>> {
    input.question = require_text("question", &input.question)?.to_string();
    input.answer = require_text("answer", &input.answer)?.to_string();
    if let Some(category) = input.category.as_deref() {
        validate_faq_category(category)?;
    }

    let faq = FaqRepo::create(&state.pool, &input).await?;
    tracing::info!(faq_id = faq.id, admin_id = admin.user_id, "FAQ created");
    Ok(ApiResponse::created("FAQ created", faq))
}

/// PUT /api/v1/faqs/{id}
pub async fn update_faq(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateFaq>,
) -> AppResult<ApiResponse<Faq>> {
    if input.is_empty() {
        return Err(AppError::BadRequest("No fields to update".into()));
    }
    reject_blank("question", input.question.as_deref())?;
    reject_blank("answer", input.answer.as_deref())?;
    if let Some(category) = input.category.as_deref() {
        validate_faq_category(category)?;
    }

    let faq = FaqRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Faq", id))?;
    tracing::info!(faq_id = id, admin_id = admin.user_id, "FAQ updated");
    Ok(ApiResponse::ok("FAQ updated", faq))
}

/// DELETE /api/v1/faqs/{id}
pub async fn delete_faq(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<()>> {
    if !FaqRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Faq", id));
    }
    tracing::info!(faq_id = id, admin_id = admin.user_id, "FAQ deleted");
    Ok(ApiResponse::message("FAQ deleted"))
}
