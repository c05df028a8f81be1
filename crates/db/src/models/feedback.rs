//! User-submitted feedback and bug reports.

use lisan_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `feedback`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Feedback {
    pub id: DbId,
    pub user_id: Option<DbId>,
    #[serde(rename = "type")]
    pub feedback_type: String,
    pub message: String,
    pub screenshot_url: Option<String>,
    pub app_version: Option<String>,
    pub device_info: Option<String>,
    pub status: String,
    pub admin_notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Feedback joined with the reporter, for admin listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FeedbackWithUser {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub username: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "type")]
    pub feedback_type: String,
    pub message: String,
    pub screenshot_url: Option<String>,
    pub app_version: Option<String>,
    pub device_info: Option<String>,
    pub status: String,
    pub admin_notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateFeedback {
    pub user_id: Option<DbId>,
    pub feedback_type: String,
    pub message: String,
    pub screenshot_url: Option<String>,
    pub app_version: Option<String>,
    pub device_info: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateFeedback {
    pub status: Option<String>,
    pub admin_notes: Option<String>,
}

#[derive(Debug, Default)]
pub struct FeedbackFilter {
    pub status: Option<String>,
    pub feedback_type: Option<String>,
}
