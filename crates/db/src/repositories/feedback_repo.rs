//! Repository for `feedback`.

use lisan_core::pagination::PageRequest;
use lisan_core::types::DbId;
use sqlx::PgPool;

use crate::models::feedback::{
    CreateFeedback, Feedback, FeedbackFilter, FeedbackWithUser, UpdateFeedback,
};

const COLUMNS: &str = "id, user_id, feedback_type, message, screenshot_url, app_version, \
                       device_info, status, admin_notes, created_at, updated_at";

const FILTER_CLAUSE: &str = "($1::TEXT IS NULL OR f.status = $1)
       AND ($2::TEXT IS NULL OR f.feedback_type = $2)";

const WITH_USER_SELECT: &str = "SELECT f.id, f.user_id, u.username, u.email, f.feedback_type,
                    f.message, f.screenshot_url, f.app_version, f.device_info, f.status,
                    f.admin_notes, f.created_at, f.updated_at
             FROM feedback f
             LEFT JOIN users u ON u.id = f.user_id";

pub struct FeedbackRepo;

impl FeedbackRepo {
    pub async fn create(pool: &PgPool, input: &CreateFeedback) -> Result<Feedback, sqlx::Error> {
        let query = format!(
            "INSERT INTO feedback
                (user_id, feedback_type, message, screenshot_url, app_version, device_info)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(input.user_id)
            .bind(&input.feedback_type)
            .bind(&input.message)
            .bind(&input.screenshot_url)
            .bind(&input.app_version)
            .bind(&input.device_info)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<FeedbackWithUser>, sqlx::Error> {
        let query = format!("{WITH_USER_SELECT} WHERE f.id = $1");
        sqlx::query_as::<_, FeedbackWithUser>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Admin listing, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &FeedbackFilter,
        page: &PageRequest,
    ) -> Result<Vec<FeedbackWithUser>, sqlx::Error> {
        let query = format!(
            "{WITH_USER_SELECT}
             WHERE {FILTER_CLAUSE}
             ORDER BY f.created_at DESC, f.id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, FeedbackWithUser>(&query)
            .bind(&filter.status)
            .bind(&filter.feedback_type)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &FeedbackFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*)::BIGINT FROM feedback f WHERE {FILTER_CLAUSE}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(&filter.status)
            .bind(&filter.feedback_type)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFeedback,
    ) -> Result<Option<Feedback>, sqlx::Error> {
        let query = format!(
            "UPDATE feedback SET
                status = COALESCE($2, status),
                admin_notes = COALESCE($3, admin_notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(&input.admin_notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
