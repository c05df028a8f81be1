//! Platform announcements.

use axum::extract::State;
use lisan_core::search::like_pattern;
use lisan_core::types::DbId;
use lisan_core::validation::{reject_blank, require_text};
use lisan_db::models::announcement::{
    Announcement, AnnouncementFilter, AnnouncementStats, CreateAnnouncement, UpdateAnnouncement,
};
use lisan_db::repositories::AnnouncementRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{PageParams, SortParams};
use crate::response::{ApiResponse, Paginated};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AnnouncementListParams {
    pub search: Option<String>,
    pub is_active: Option<bool>,
}

/// GET /api/v1/announcements
pub async fn list_announcements(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageParams>,
    AppQuery(sort): AppQuery<SortParams>,
    AppQuery(params): AppQuery<AnnouncementListParams>,
) -> AppResult<ApiResponse<Paginated<Announcement>>> {
    let page = page.to_request()?;
    let filter = AnnouncementFilter {
        search: like_pattern(params.search.as_deref()),
        is_active: params.is_active,
    };

    let rows = AnnouncementRepo::list(
        &state.pool,
        &filter,
        sort.sort_by.as_deref(),
        sort.order(),
        &page,
    )
    .await?;
    let total = AnnouncementRepo::count(&state.pool, &filter).await?;
    Ok(ApiResponse::ok(
        "Announcements retrieved",
        Paginated::new(rows, &page, total),
    ))
}

/// GET /api/v1/announcements/stats
pub async fn stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<AnnouncementStats>> {
    let stats = AnnouncementRepo::stats(&state.pool).await?;
    Ok(ApiResponse::ok("Announcement statistics retrieved", stats))
}

/// GET /api/v1/announcements/{id}
pub async fn get_announcement(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<Announcement>> {
    let announcement = AnnouncementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Announcement", id))?;
    Ok(ApiResponse::ok("Announcement retrieved", announcement))
}

/// POST /api/v1/announcements
pub async fn create_announcement(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(mut input): AppJson<CreateAnnouncement>,
) -> AppResult<ApiResponse<Announcement>> {
    input.title = require_text("title", &input.title)?.to_string();
    input.content = require_text("content", &input.content)?.to_string();

    let announcement = AnnouncementRepo::create(&state.pool, &input).await?;
    tracing::info!(announcement_id = announcement.id, admin_id = admin.user_id, "Announcement created");
    Ok(ApiResponse::created("Announcement created", announcement))
}

/// PUT /api/v1/announcements/{id}
pub async fn update_announcement(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateAnnouncement>,
) -> AppResult<ApiResponse<Announcement>> {
    reject_blank("title", input.title.as_deref())?;
    reject_blank("content", input.content.as_deref())?;

    let announcement = AnnouncementRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Announcement", id))?;
    tracing::info!(announcement_id = id, admin_id = admin.user_id, "Announcement updated");
    Ok(ApiResponse::ok("Announcement updated", announcement))
}

/// DELETE /api/v1/announcements/{id}
pub async fn delete_announcement(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<()>> {
    if !AnnouncementRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Announcement", id));
    }
    tracing::info!(announcement_id = id, admin_id = admin.user_id, "Announcement deleted");
    Ok(ApiResponse::message("Announcement deleted"))
}
