//! Dictionary item completion and the per-dictionary roll-up.

use lisan_core::progress::completion_percentage;
use lisan_core::types::DbId;
use lisan_db::models::learning::{DictionaryProgress, ItemProgress};
use lisan_db::repositories::{DictionaryItemRepo, DictionaryProgressRepo, ItemProgressRepo};
use serde::Serialize;
use sqlx::{PgConnection, PgPool};

use crate::error::{AppError, AppResult};

/// Item row and dictionary roll-up after a completion toggle.
#[derive(Debug, Serialize)]
pub struct ItemCompletion {
    pub item_progress: ItemProgress,
    pub dictionary_progress: DictionaryProgress,
}

/// Mark an item completed (or not) and roll the dictionary up.
pub async fn set_item_completion(
    pool: &PgPool,
    user_id: DbId,
    item_id: DbId,
    is_completed: bool,
) -> AppResult<ItemCompletion> {
    let item = DictionaryItemRepo::find_by_id(pool, item_id)
        .await?
        .ok_or_else(|| AppError::not_found("DictionaryItem", item_id))?;

    let mut tx = pool.begin().await?;
    let item_progress =
        ItemProgressRepo::set_completion(&mut *tx, user_id, item.id, is_completed).await?;
    let dictionary_progress = recompute_dictionary(&mut tx, user_id, item.dictionary_id).await?;
    tx.commit().await?;

    tracing::debug!(
        user_id,
        item_id,
        is_completed,
        progress = dictionary_progress.progress_percentage,
        "Dictionary item progress updated"
    );
    Ok(ItemCompletion {
        item_progress,
        dictionary_progress,
    })
}

/// Re-derive a user's dictionary row from their item rows.
pub async fn recompute_dictionary(
    conn: &mut PgConnection,
    user_id: DbId,
    dictionary_id: DbId,
) -> Result<DictionaryProgress, sqlx::Error> {
    let counts = DictionaryProgressRepo::item_counts(&mut *conn, user_id, dictionary_id).await?;
    let percentage = completion_percentage(counts.completed, counts.published);
    DictionaryProgressRepo::upsert(
        &mut *conn,
        user_id,
        dictionary_id,
        clamp_count(counts.completed),
        clamp_count(counts.published),
        percentage,
    )
    .await
}

/// Forget a user's progress on every item of a dictionary.
///
/// Returns whether anything was deleted.
pub async fn reset_dictionary(pool: &PgPool, user_id: DbId, dictionary_id: DbId) -> AppResult<bool> {
    let mut tx = pool.begin().await?;
    let items = ItemProgressRepo::delete_for_dictionary(&mut *tx, user_id, dictionary_id).await?;
    let summary = DictionaryProgressRepo::delete(&mut *tx, user_id, dictionary_id).await?;
    tx.commit().await?;

    tracing::info!(user_id, dictionary_id, items, "Dictionary progress reset");
    Ok(items > 0 || summary)
}

fn clamp_count(n: i64) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}
