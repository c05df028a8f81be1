//! Repository for the `courses` table and the nested course tree.

use std::collections::HashMap;

use lisan_core::pagination::PageRequest;
use lisan_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::{
    Course, CourseDetail, CourseFilter, CreateCourse, ModuleWithLessons, UpdateCourse,
};
use crate::repositories::{LessonRepo, ModuleRepo};

const COLUMNS: &str = "id, title, slug, description, thumbnail_url, level, price, \
                       is_published, created_at, updated_at";

const FILTER_CLAUSE: &str = "($1::TEXT IS NULL OR title ILIKE $1)
       AND ($2::TEXT IS NULL OR level = $2)
       AND ($3::BOOLEAN IS NULL OR is_published = $3)";

/// Provides CRUD operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses (title, slug, description, thumbnail_url, level, price, is_published)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.thumbnail_url)
            .bind(&input.level)
            .bind(input.price)
            .bind(input.is_published)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE slug = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Whether `slug` is used by a course other than `exclude_id`.
    pub async fn slug_exists(
        pool: &PgPool,
        slug: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM courses WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// List courses, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &CourseFilter,
        page: &PageRequest,
    ) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses
             WHERE {FILTER_CLAUSE}
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&filter.search)
            .bind(&filter.level)
            .bind(filter.is_published)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &CourseFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*)::BIGINT FROM courses WHERE {FILTER_CLAUSE}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(&filter.search)
            .bind(&filter.level)
            .bind(filter.is_published)
            .fetch_one(pool)
            .await
    }

    /// Load a course by slug with every module and lesson, both ordered by
    /// `order_index`.
    pub async fn find_detail_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<CourseDetail>, sqlx::Error> {
        let Some(course) = Self::find_by_slug(pool, slug).await? else {
            return Ok(None);
        };

        let modules = ModuleRepo::list_by_course(pool, course.id).await?;
        let lessons = LessonRepo::list_by_course(pool, course.id).await?;

        let mut by_module: HashMap<DbId, Vec<_>> = HashMap::new();
        for lesson in lessons {
            by_module.entry(lesson.module_id).or_default().push(lesson);
        }

        let modules = modules
            .into_iter()
            .map(|module| {
                let lessons = by_module.remove(&module.id).unwrap_or_default();
                ModuleWithLessons { module, lessons }
            })
            .collect();

        Ok(Some(CourseDetail { course, modules }))
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCourse,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                thumbnail_url = COALESCE($5, thumbnail_url),
                level = COALESCE($6, level),
                price = COALESCE($7, price),
                is_published = COALESCE($8, is_published)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.thumbnail_url)
            .bind(&input.level)
            .bind(input.price)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    /// Delete a course; modules, lessons, enrollments and progress cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
