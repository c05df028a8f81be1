//! Repository for `level_boundaries`.

use sqlx::PgPool;

use crate::models::level::LevelBoundary;

const COLUMNS: &str = "level, min_xp, created_at, updated_at";

pub struct LevelBoundaryRepo;

impl LevelBoundaryRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<LevelBoundary>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM level_boundaries ORDER BY level ASC");
        sqlx::query_as::<_, LevelBoundary>(&query)
            .fetch_all(pool)
            .await
    }

    /// The highest boundary whose `min_xp` the given XP satisfies.
    pub async fn lookup(pool: &PgPool, total_xp: i64) -> Result<Option<LevelBoundary>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM level_boundaries
             WHERE min_xp <= $1
             ORDER BY level DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, LevelBoundary>(&query)
            .bind(total_xp)
            .fetch_optional(pool)
            .await
    }

    pub async fn upsert(pool: &PgPool, level: i32, min_xp: i64) -> Result<LevelBoundary, sqlx::Error> {
        let query = format!(
            "INSERT INTO level_boundaries (level, min_xp) VALUES ($1, $2)
             ON CONFLICT (level) DO UPDATE SET min_xp = EXCLUDED.min_xp
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LevelBoundary>(&query)
            .bind(level)
            .bind(min_xp)
            .fetch_one(pool)
            .await
    }
}
