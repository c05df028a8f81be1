//! Sign dictionaries and their items.

use axum::extract::State;
use lisan_core::content::{
    validate_dictionary_status, validate_difficulty, validate_item_type, DEFAULT_DIFFICULTY,
    DEFAULT_ITEM_TYPE, DICTIONARY_DRAFT,
};
use lisan_core::search::like_pattern;
use lisan_core::slug::slugify;
use lisan_core::types::DbId;
use lisan_core::validation::{reject_blank, require_text};
use lisan_db::models::dictionary::{
    CreateDictionary, CreateDictionaryItem, Dictionary, DictionaryFilter, DictionaryItem,
    DictionaryItemFilter, UpdateDictionary, UpdateDictionaryItem,
};
use lisan_db::repositories::{AiModelRepo, DictionaryItemRepo, DictionaryRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PageParams;
use crate::response::{ApiResponse, Paginated};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct DictionaryListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub difficulty: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateDictionaryRequest {
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub status: Option<String>,
    pub difficulty: Option<String>,
    pub order_index: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDictionaryRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub status: Option<String>,
    pub difficulty: Option<String>,
    pub order_index: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ItemListParams {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub dictionary_id: DbId,
    pub word: String,
    pub definition: Option<String>,
    pub video_url: String,
    pub image_url: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub order_index: Option<i32>,
    pub ai_model_id: Option<DbId>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub word: Option<String>,
    pub definition: Option<String>,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub order_index: Option<i32>,
    pub ai_model_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn unique_dictionary_slug(
    state: &AppState,
    title: &str,
    exclude_id: Option<DbId>,
) -> AppResult<String> {
    let slug = slugify(title)?;
    if DictionaryRepo::slug_exists(&state.pool, &slug, exclude_id).await? {
        return Err(AppError::conflict(format!(
            "A dictionary with slug '{slug}' already exists"
        )));
    }
    Ok(slug)
}

/// Item slugs are unique within their dictionary.
async fn unique_item_slug(
    state: &AppState,
    dictionary_id: DbId,
    word: &str,
    exclude_id: Option<DbId>,
) -> AppResult<String> {
    let slug = slugify(word)?;
    if DictionaryItemRepo::slug_exists(&state.pool, dictionary_id, &slug, exclude_id).await? {
        return Err(AppError::conflict(format!(
            "An item with slug '{slug}' already exists in this dictionary"
        )));
    }
    Ok(slug)
}

async fn ensure_ai_model_exists(state: &AppState, ai_model_id: Option<DbId>) -> AppResult<()> {
    if let Some(id) = ai_model_id {
        if AiModelRepo::find_by_id(&state.pool, id).await?.is_none() {
            return Err(AppError::not_found("AiModel", id));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Dictionaries
// ---------------------------------------------------------------------------

/// GET /api/v1/dictionaries
pub async fn list_dictionaries(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageParams>,
    AppQuery(params): AppQuery<DictionaryListParams>,
) -> AppResult<ApiResponse<Paginated<Dictionary>>> {
    let page = page.to_request()?;
    let filter = DictionaryFilter {
        search: like_pattern(params.search.as_deref()),
        status: params.status,
        difficulty: params.difficulty,
    };

    let rows = DictionaryRepo::list(&state.pool, &filter, &page).await?;
    let total = DictionaryRepo::count(&state.pool, &filter).await?;
    Ok(ApiResponse::ok(
        "Dictionaries retrieved",
        Paginated::new(rows, &page, total),
    ))
}

/// GET /api/v1/dictionaries/{id}
pub async fn get_dictionary(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<Dictionary>> {
    let dictionary = DictionaryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Dictionary", id))?;
    Ok(ApiResponse::ok("Dictionary retrieved", dictionary))
}

/// POST /api/v1/dictionaries
pub async fn create_dictionary(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateDictionaryRequest>,
) -> AppResult<ApiResponse<Dictionary>> {
    let title = require_text("title", &input.title)?.to_string();
    let status = input.status.unwrap_or_else(|| DICTIONARY_DRAFT.to_string());
    validate_dictionary_status(&status)?;
    let difficulty = input
        .difficulty
        .unwrap_or_else(|| DEFAULT_DIFFICULTY.to_string());
    validate_difficulty(&difficulty)?;

    let slug = unique_dictionary_slug(&state, &title, None).await?;
    let dictionary = DictionaryRepo::create(
        &state.pool,
        &CreateDictionary {
            title,
            slug,
            description: input.description,
            thumbnail_url: input.thumbnail_url,
            status,
            difficulty,
            order_index: input.order_index.unwrap_or(0),
        },
    )
    .await?;

    tracing::info!(dictionary_id = dictionary.id, admin_id = admin.user_id, "Dictionary created");
    Ok(ApiResponse::created("Dictionary created", dictionary))
}

/// PATCH /api/v1/dictionaries/{id}
pub async fn update_dictionary(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateDictionaryRequest>,
) -> AppResult<ApiResponse<Dictionary>> {
    reject_blank("title", input.title.as_deref())?;
    if let Some(status) = input.status.as_deref() {
        validate_dictionary_status(status)?;
    }
    if let Some(difficulty) = input.difficulty.as_deref() {
        validate_difficulty(difficulty)?;
    }

    let (title, slug) = match input.title.as_deref() {
        Some(title) => {
            let title = title.trim().to_string();
            let slug = unique_dictionary_slug(&state, &title, Some(id)).await?;
            (Some(title), Some(slug))
        }
        None => (None, None),
    };

    let dictionary = DictionaryRepo::update(
        &state.pool,
        id,
        &UpdateDictionary {
            title,
            slug,
            description: input.description,
            thumbnail_url: input.thumbnail_url,
            status: input.status,
            difficulty: input.difficulty,
            order_index: input.order_index,
        },
    )
    .await?
    .ok_or_else(|| AppError::not_found("Dictionary", id))?;

    tracing::info!(dictionary_id = id, admin_id = admin.user_id, "Dictionary updated");
    Ok(ApiResponse::ok("Dictionary updated", dictionary))
}

/// DELETE /api/v1/dictionaries/{id}
pub async fn delete_dictionary(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<()>> {
    if !DictionaryRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Dictionary", id));
    }
    tracing::info!(dictionary_id = id, admin_id = admin.user_id, "Dictionary deleted");
    Ok(ApiResponse::message("Dictionary deleted"))
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// GET /api/v1/dictionaries/{id}/items
pub async fn list_items(
    State(state): State<AppState>,
    AppPath(dictionary_id): AppPath<DbId>,
    AppQuery(page): AppQuery<PageParams>,
    AppQuery(params): AppQuery<ItemListParams>,
) -> AppResult<ApiResponse<Paginated<DictionaryItem>>> {
    let page = page.to_request()?;
    if DictionaryRepo::find_by_id(&state.pool, dictionary_id).await?.is_none() {
        return Err(AppError::not_found("Dictionary", dictionary_id));
    }
    let filter = DictionaryItemFilter {
        search: like_pattern(params.search.as_deref()),
        item_type: params.item_type,
    };

    let items = DictionaryItemRepo::list_by_dictionary(&state.pool, dictionary_id, &filter, &page)
        .await?;
    let total = DictionaryItemRepo::count_by_dictionary(&state.pool, dictionary_id, &filter).await?;
    Ok(ApiResponse::ok(
        "Dictionary items retrieved",
        Paginated::new(items, &page, total),
    ))
}

/// GET /api/v1/dictionaries/items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<DictionaryItem>> {
    let item = DictionaryItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("DictionaryItem", id))?;
    Ok(ApiResponse::ok("Dictionary item retrieved", item))
}

/// POST /api/v1/dictionaries/items
pub async fn create_item(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateItemRequest>,
) -> AppResult<ApiResponse<DictionaryItem>> {
    let word = require_text("word", &input.word)?.to_string();
    let video_url = require_text("video_url", &input.video_url)?.to_string();
    let item_type = input
        .item_type
        .unwrap_or_else(|| DEFAULT_ITEM_TYPE.to_string());
    validate_item_type(&item_type)?;

    if DictionaryRepo::find_by_id(&state.pool, input.dictionary_id)
        .await?
        .is_none()
    {
        return Err(AppError::not_found("Dictionary", input.dictionary_id));
    }
    ensure_ai_model_exists(&state, input.ai_model_id).await?;

    let slug = unique_item_slug(&state, input.dictionary_id, &word, None).await?;
    let item = DictionaryItemRepo::create(
        &state.pool,
        &CreateDictionaryItem {
            dictionary_id: input.dictionary_id,
            word,
            slug,
            definition: input.definition,
            video_url,
            image_url: input.image_url,
            item_type,
            order_index: input.order_index.unwrap_or(0),
            ai_model_id: input.ai_model_id,
        },
    )
    .await?;

    tracing::info!(
        item_id = item.id,
        dictionary_id = item.dictionary_id,
        admin_id = admin.user_id,
        "Dictionary item created",
    );
    Ok(ApiResponse::created("Dictionary item created", item))
}

/// PATCH /api/v1/dictionaries/items/{id}
pub async fn update_item(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateItemRequest>,
) -> AppResult<ApiResponse<DictionaryItem>> {
    reject_blank("word", input.word.as_deref())?;
    reject_blank("video_url", input.video_url.as_deref())?;
    if let Some(item_type) = input.item_type.as_deref() {
        validate_item_type(item_type)?;
    }
    let existing = DictionaryItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("DictionaryItem", id))?;
    ensure_ai_model_exists(&state, input.ai_model_id).await?;

    let (word, slug) = match input.word.as_deref() {
        Some(word) => {
            let word = word.trim().to_string();
            let slug = unique_item_slug(&state, existing.dictionary_id, &word, Some(id)).await?;
            (Some(word), Some(slug))
        }
        None => (None, None),
    };

    let item = DictionaryItemRepo::update(
        &state.pool,
        id,
        &UpdateDictionaryItem {
            word,
            slug,
            definition: input.definition,
            video_url: input.video_url,
            image_url: input.image_url,
            item_type: input.item_type,
            order_index: input.order_index,
            ai_model_id: input.ai_model_id,
        },
    )
    .await?
    .ok_or_else(|| AppError::not_found("DictionaryItem", id))?;

    tracing::info!(item_id = id, admin_id = admin.user_id, "Dictionary item updated");
    Ok(ApiResponse::ok("Dictionary item updated", item))
}

/// DELETE /api/v1/dictionaries/items/{id}
pub async fn delete_item(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<()>> {
    if !DictionaryItemRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("DictionaryItem", id));
    }
    tracing::info!(item_id = id, admin_id = admin.user_id, "Dictionary item deleted");
    Ok(ApiResponse::message("Dictionary item deleted"))
}
