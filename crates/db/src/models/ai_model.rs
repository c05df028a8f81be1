//! Registry of on-device recognition models.

use lisan_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `ai_models`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AiModel {
    pub id: DbId,
    pub model_url: String,
    pub config: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateAiModel {
    pub model_url: String,
    pub config: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateAiModel {
    pub model_url: Option<String>,
    pub config: Option<serde_json::Value>,
}

/// A dictionary item referencing a model.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AiModelUsage {
    pub ai_model_id: DbId,
    pub id: DbId,
    pub word: String,
}

/// A model with the dictionary items that use it.
#[derive(Debug, Clone, Serialize)]
pub struct AiModelWithItems {
    #[serde(flatten)]
    pub model: AiModel,
    pub dictionary_items: Vec<AiModelUsage>,
}
