//! Course catalog and admin course management.

use axum::extract::State;
use lisan_core::content::{validate_difficulty, DEFAULT_DIFFICULTY};
use lisan_core::search::like_pattern;
use lisan_core::slug::slugify;
use lisan_core::types::DbId;
use lisan_core::validation::{reject_blank, require_non_negative, require_text};
use lisan_db::models::course::{Course, CourseDetail, CourseFilter, CreateCourse, UpdateCourse};
use lisan_db::repositories::CourseRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PageParams;
use crate::response::{ApiResponse, Paginated};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CourseListParams {
    pub search: Option<String>,
    pub level: Option<String>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: Option<String>,
    pub level: Option<String>,
    pub price: Option<i64>,
    pub thumbnail_url: Option<String>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub level: Option<String>,
    pub price: Option<i64>,
    pub thumbnail_url: Option<String>,
    pub is_published: Option<bool>,
}

/// Slugify `title` and reject it if another course already uses the slug.
async fn unique_slug(state: &AppState, title: &str, exclude_id: Option<DbId>) -> AppResult<String> {
    let slug = slugify(title)?;
    if CourseRepo::slug_exists(&state.pool, &slug, exclude_id).await? {
        return Err(AppError::conflict(format!(
            "A course with slug '{slug}' already exists"
        )));
    }
    Ok(slug)
}

/// GET /api/v1/courses
pub async fn list_courses(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageParams>,
    AppQuery(params): AppQuery<CourseListParams>,
) -> AppResult<ApiResponse<Paginated<Course>>> {
    let page = page.to_request()?;
    let filter = CourseFilter {
        search: like_pattern(params.search.as_deref()),
        level: params.level,
        is_published: params.is_published,
    };

    let courses = CourseRepo::list(&state.pool, &filter, &page).await?;
    let total = CourseRepo::count(&state.pool, &filter).await?;
    Ok(ApiResponse::ok(
        "Courses retrieved",
        Paginated::new(courses, &page, total),
    ))
}

/// GET /api/v1/courses/{slug}
///
/// The course with its modules and their lessons, both ordered by
/// `order_index`.
pub async fn get_course(
    State(state): State<AppState>,
    AppPath(slug): AppPath<String>,
) -> AppResult<ApiResponse<CourseDetail>> {
    let detail = CourseRepo::find_detail_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Course '{slug}' not found")))?;
    Ok(ApiResponse::ok("Course retrieved", detail))
}

/// POST /api/v1/courses
pub async fn create_course(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCourseRequest>,
) -> AppResult<ApiResponse<Course>> {
    let title = require_text("title", &input.title)?.to_string();
    let level = input.level.unwrap_or_else(|| DEFAULT_DIFFICULTY.to_string());
    validate_difficulty(&level)?;
    let price = input.price.unwrap_or(0);
    require_non_negative("price", price)?;

    let slug = unique_slug(&state, &title, None).await?;
    let course = CourseRepo::create(
        &state.pool,
        &CreateCourse {
            title,
            slug,
            description: input.description,
            thumbnail_url: input.thumbnail_url,
            level,
            price,
            is_published: input.is_published.unwrap_or(false),
        },
    )
    .await?;

    tracing::info!(course_id = course.id, admin_id = admin.user_id, "Course created");
    Ok(ApiResponse::created("Course created", course))
}

/// PUT /api/v1/courses/{id}
pub async fn update_course(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateCourseRequest>,
) -> AppResult<ApiResponse<Course>> {
    reject_blank("title", input.title.as_deref())?;
    if let Some(level) = input.level.as_deref() {
        validate_difficulty(level)?;
    }
    if let Some(price) = input.price {
        require_non_negative("price", price)?;
    }

    let (title, slug) = match input.title.as_deref() {
        Some(title) => {
            let title = title.trim().to_string();
            let slug = unique_slug(&state, &title, Some(id)).await?;
            (Some(title), Some(slug))
        }
        None => (None, None),
    };

    let course = CourseRepo::update(
        &state.pool,
        id,
        &UpdateCourse {
            title,
            slug,
            description: input.description,
            thumbnail_url: input.thumbnail_url,
            level: input.level,
            price: input.price,
            is_published: input.is_published,
        },
    )
    .await?
    .ok_or_else(|| AppError::not_found("Course", id))?;

    tracing::info!(course_id = id, admin_id = admin.user_id, "Course updated");
    Ok(ApiResponse::ok("Course updated", course))
}

/// DELETE /api/v1/courses/{id}
pub async fn delete_course(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<()>> {
    if !CourseRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Course", id));
    }
    tracing::info!(course_id = id, admin_id = admin.user_id, "Course deleted");
    Ok(ApiResponse::message("Course deleted"))
}
