//! Level boundary catalog.

use lisan_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// A row from `level_boundaries`: the minimum lifetime XP for a level.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LevelBoundary {
    pub level: i32,
    pub min_xp: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
