//! Sign dictionaries and their items.

use lisan_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `dictionaries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Dictionary {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub status: String,
    pub difficulty: String,
    pub order_index: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateDictionary {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub status: String,
    pub difficulty: String,
    pub order_index: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateDictionary {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub status: Option<String>,
    pub difficulty: Option<String>,
    pub order_index: Option<i32>,
}

#[derive(Debug, Default)]
pub struct DictionaryFilter {
    pub search: Option<String>,
    pub status: Option<String>,
    pub difficulty: Option<String>,
}

/// A row from the `dictionary_items` table: one sign.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DictionaryItem {
    pub id: DbId,
    pub dictionary_id: DbId,
    pub word: String,
    pub slug: String,
    pub definition: Option<String>,
    pub video_url: String,
    pub image_url: Option<String>,
    #[serde(rename = "type")]
    pub item_type: String,
    pub order_index: i32,
    pub ai_model_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateDictionaryItem {
    pub dictionary_id: DbId,
    pub word: String,
    pub slug: String,
    pub definition: Option<String>,
    pub video_url: String,
    pub image_url: Option<String>,
    pub item_type: String,
    pub order_index: i32,
    pub ai_model_id: Option<DbId>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateDictionaryItem {
    pub word: Option<String>,
    pub slug: Option<String>,
    pub definition: Option<String>,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
    pub item_type: Option<String>,
    pub order_index: Option<i32>,
    pub ai_model_id: Option<DbId>,
}

#[derive(Debug, Default)]
pub struct DictionaryItemFilter {
    pub search: Option<String>,
    pub item_type: Option<String>,
}
