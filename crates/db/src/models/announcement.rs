//! Platform announcements.

use lisan_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `announcements`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Announcement {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateAnnouncement {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateAnnouncement {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub is_active: Option<bool>,
}

pub const ANNOUNCEMENT_SORT_COLUMNS: &[&str] = &["created_at", "updated_at", "title"];

#[derive(Debug, Default)]
pub struct AnnouncementFilter {
    /// `ILIKE` pattern on title and content.
    pub search: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnnouncementStats {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
    pub new_this_month: i64,
}
