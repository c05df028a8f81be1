//! Repository for `announcements`.

use lisan_core::pagination::PageRequest;
use lisan_core::search::{resolve_sort_column, SortOrder};
use lisan_core::types::DbId;
use sqlx::PgPool;

use crate::models::announcement::{
    Announcement, AnnouncementFilter, AnnouncementStats, CreateAnnouncement, UpdateAnnouncement,
    ANNOUNCEMENT_SORT_COLUMNS,
};

const COLUMNS: &str = "id, title, content, image_url, video_url, is_active, created_at, updated_at";

const FILTER_CLAUSE: &str = "($1::TEXT IS NULL OR title ILIKE $1 OR content ILIKE $1)
       AND ($2::BOOLEAN IS NULL OR is_active = $2)";

pub struct AnnouncementRepo;

impl AnnouncementRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateAnnouncement,
    ) -> Result<Announcement, sqlx::Error> {
        let query = format!(
            "INSERT INTO announcements (title, content, image_url, video_url, is_active)
             VALUES ($1, $2, $3, $4, COALESCE($5, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.image_url)
            .bind(&input.video_url)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Announcement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM announcements WHERE id = $1");
        sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &AnnouncementFilter,
        sort_by: Option<&str>,
        order: SortOrder,
        page: &PageRequest,
    ) -> Result<Vec<Announcement>, sqlx::Error> {
        let sort = resolve_sort_column(sort_by, ANNOUNCEMENT_SORT_COLUMNS, "created_at");
        let dir = order.as_sql();
        let query = format!(
            "SELECT {COLUMNS} FROM announcements
             WHERE {FILTER_CLAUSE}
             ORDER BY {sort} {dir}, id {dir}
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(&filter.search)
            .bind(filter.is_active)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &AnnouncementFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*)::BIGINT FROM announcements WHERE {FILTER_CLAUSE}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(&filter.search)
            .bind(filter.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn stats(pool: &PgPool) -> Result<AnnouncementStats, sqlx::Error> {
        sqlx::query_as::<_, AnnouncementStats>(
            "SELECT
                COUNT(*)::BIGINT AS total,
                COUNT(*) FILTER (WHERE is_active)::BIGINT AS active,
                COUNT(*) FILTER (WHERE NOT is_active)::BIGINT AS inactive,
                COUNT(*) FILTER (WHERE created_at >= date_trunc('month', NOW()))::BIGINT
                    AS new_this_month
             FROM announcements",
        )
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAnnouncement,
    ) -> Result<Option<Announcement>, sqlx::Error> {
        let query = format!(
            "UPDATE announcements SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                image_url = COALESCE($4, image_url),
                video_url = COALESCE($5, video_url),
                is_active = COALESCE($6, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.image_url)
            .bind(&input.video_url)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
