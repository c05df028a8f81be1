//! Lessons inside a course module.

use axum::extract::State;
use lisan_core::content::{resolve_target_gesture, DEFAULT_LESSON_XP};
use lisan_core::slug::slugify;
use lisan_core::types::DbId;
use lisan_core::validation::{reject_blank, require_non_negative, require_text};
use lisan_db::models::lesson::{CreateLesson, Lesson, UpdateLesson};
use lisan_db::repositories::{LessonRepo, ModuleRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateLessonRequest {
    pub module_id: DbId,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub lesson_type: String,
    pub target_gesture: Option<String>,
    pub content_url: Option<String>,
    pub order_index: Option<i32>,
    pub xp_reward: Option<i32>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLessonRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub lesson_type: Option<String>,
    pub target_gesture: Option<String>,
    pub content_url: Option<String>,
    pub order_index: Option<i32>,
    pub xp_reward: Option<i32>,
    pub is_published: Option<bool>,
}

/// Lesson slugs are unique within their module.
async fn unique_slug(
    state: &AppState,
    module_id: DbId,
    title: &str,
    exclude_id: Option<DbId>,
) -> AppResult<String> {
    let slug = slugify(title)?;
    if LessonRepo::slug_exists(&state.pool, module_id, &slug, exclude_id).await? {
        return Err(AppError::conflict(format!(
            "A lesson with slug '{slug}' already exists in this module"
        )));
    }
    Ok(slug)
}

/// GET /api/v1/lessons/{id}
pub async fn get_lesson(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<Lesson>> {
    let lesson = LessonRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Lesson", id))?;
    Ok(ApiResponse::ok("Lesson retrieved", lesson))
}

/// POST /api/v1/lessons
pub async fn create_lesson(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateLessonRequest>,
) -> AppResult<ApiResponse<Lesson>> {
    let title = require_text("title", &input.title)?.to_string();
    let target_gesture =
        resolve_target_gesture(&input.lesson_type, input.target_gesture.as_deref())?;
    let xp_reward = input.xp_reward.unwrap_or(DEFAULT_LESSON_XP);
    require_non_negative("xp_reward", i64::from(xp_reward))?;

    if ModuleRepo::find_by_id(&state.pool, input.module_id).await?.is_none() {
        return Err(AppError::not_found("Module", input.module_id));
    }

    let slug = unique_slug(&state, input.module_id, &title, None).await?;
    let lesson = LessonRepo::create(
        &state.pool,
        &CreateLesson {
            module_id: input.module_id,
            title,
            slug,
            description: input.description,
            lesson_type: input.lesson_type,
            target_gesture,
            content_url: input.content_url,
            order_index: input.order_index.unwrap_or(0),
            xp_reward,
            is_published: input.is_published.unwrap_or(true),
        },
    )
    .await?;

    tracing::info!(
        lesson_id = lesson.id,
        module_id = lesson.module_id,
        admin_id = admin.user_id,
        "Lesson created",
    );
    Ok(ApiResponse::created("Lesson created", lesson))
}

/// PUT /api/v1/lessons/{id}
///
/// Changing the type to anything but `camera_practice` clears the target
/// gesture. Sending only `target_gesture` re-validates it against the
/// current type.
pub async fn update_lesson(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateLessonRequest>,
) -> AppResult<ApiResponse<Lesson>> {
    reject_blank("title", input.title.as_deref())?;
    if let Some(xp) = input.xp_reward {
        require_non_negative("xp_reward", i64::from(xp))?;
    }
    let existing = LessonRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Lesson", id))?;

    let (lesson_type, target_gesture) =
        if input.lesson_type.is_some() || input.target_gesture.is_some() {
            let lesson_type = input.lesson_type.unwrap_or(existing.lesson_type);
            let gesture = input
                .target_gesture
                .as_deref()
                .or(existing.target_gesture.as_deref());
            let resolved = resolve_target_gesture(&lesson_type, gesture)?;
            (Some(lesson_type), resolved)
        } else {
            (None, None)
        };

    let (title, slug) = match input.title.as_deref() {
        Some(title) => {
            let title = title.trim().to_string();
            let slug = unique_slug(&state, existing.module_id, &title, Some(id)).await?;
            (Some(title), Some(slug))
        }
        None => (None, None),
    };

    let lesson = LessonRepo::update(
        &state.pool,
        id,
        &UpdateLesson {
            title,
            slug,
            description: input.description,
            lesson_type,
            target_gesture,
            content_url: input.content_url,
            order_index: input.order_index,
            xp_reward: input.xp_reward,
            is_published: input.is_published,
        },
    )
    .await?
    .ok_or_else(|| AppError::not_found("Lesson", id))?;

    tracing::info!(lesson_id = id, admin_id = admin.user_id, "Lesson updated");
    Ok(ApiResponse::ok("Lesson updated", lesson))
}

/// DELETE /api/v1/lessons/{id}
pub async fn delete_lesson(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<()>> {
    if !LessonRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Lesson", id));
    }
    tracing::info!(lesson_id = id, admin_id = admin.user_id, "Lesson deleted");
    Ok(ApiResponse::message("Lesson deleted"))
}
