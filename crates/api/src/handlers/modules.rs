//! Course modules (chapters).

use axum::extract::State;
use lisan_core::slug::slugify;
use lisan_core::types::DbId;
use lisan_core::validation::{reject_blank, require_text};
use lisan_db::models::course_module::{CourseModule, CreateCourseModule, UpdateCourseModule};
use lisan_db::repositories::{CourseRepo, ModuleRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateModuleRequest {
    pub course_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub order_index: Option<i32>,
    pub thumbnail_url: Option<String>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateModuleRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub order_index: Option<i32>,
    pub thumbnail_url: Option<String>,
    pub is_published: Option<bool>,
}

/// Module slugs are unique within their course.
async fn unique_slug(
    state: &AppState,
    course_id: DbId,
    title: &str,
    exclude_id: Option<DbId>,
) -> AppResult<String> {
    let slug = slugify(title)?;
    if ModuleRepo::slug_exists(&state.pool, course_id, &slug, exclude_id).await? {
        return Err(AppError::conflict(format!(
            "A module with slug '{slug}' already exists in this course"
        )));
    }
    Ok(slug)
}

/// GET /api/v1/modules/{id}
pub async fn get_module(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<CourseModule>> {
    let module = ModuleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Module", id))?;
    Ok(ApiResponse::ok("Module retrieved", module))
}

/// POST /api/v1/modules
pub async fn create_module(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateModuleRequest>,
) -> AppResult<ApiResponse<CourseModule>> {
    let title = require_text("title", &input.title)?.to_string();
    if CourseRepo::find_by_id(&state.pool, input.course_id).await?.is_none() {
        return Err(AppError::not_found("Course", input.course_id));
    }

    let slug = unique_slug(&state, input.course_id, &title, None).await?;
    let module = ModuleRepo::create(
        &state.pool,
        &CreateCourseModule {
            course_id: input.course_id,
            title,
            slug,
            description: input.description,
            thumbnail_url: input.thumbnail_url,
            order_index: input.order_index.unwrap_or(0),
            is_published: input.is_published.unwrap_or(true),
        },
    )
    .await?;

    tracing::info!(
        module_id = module.id,
        course_id = module.course_id,
        admin_id = admin.user_id,
        "Module created",
    );
    Ok(ApiResponse::created("Module created", module))
}

/// PUT /api/v1/modules/{id}
pub async fn update_module(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateModuleRequest>,
) -> AppResult<ApiResponse<CourseModule>> {
    reject_blank("title", input.title.as_deref())?;
    let existing = ModuleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Module", id))?;

    let (title, slug) = match input.title.as_deref() {
        Some(title) => {
            let title = title.trim().to_string();
            let slug = unique_slug(&state, existing.course_id, &title, Some(id)).await?;
            (Some(title), Some(slug))
        }
        None => (None, None),
    };

    let module = ModuleRepo::update(
        &state.pool,
        id,
        &UpdateCourseModule {
            title,
            slug,
            description: input.description,
            thumbnail_url: input.thumbnail_url,
            order_index: input.order_index,
            is_published: input.is_published,
        },
    )
    .await?
    .ok_or_else(|| AppError::not_found("Module", id))?;

    tracing::info!(module_id = id, admin_id = admin.user_id, "Module updated");
    Ok(ApiResponse::ok("Module updated", module))
}

/// DELETE /api/v1/modules/{id}
pub async fn delete_module(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<()>> {
    if !ModuleRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Module", id));
    }
    tracing::info!(module_id = id, admin_id = admin.user_id, "Module deleted");
    Ok(ApiResponse::message("Module deleted"))
}
