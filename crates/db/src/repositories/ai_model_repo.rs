//! Repository for the `ai_models` registry.

use std::collections::HashMap;

use lisan_core::types::DbId;
use sqlx::PgPool;

use crate::models::ai_model::{AiModel, AiModelUsage, AiModelWithItems, CreateAiModel, UpdateAiModel};

const COLUMNS: &str = "id, model_url, config, created_at, updated_at";

pub struct AiModelRepo;

impl AiModelRepo {
    pub async fn create(pool: &PgPool, input: &CreateAiModel) -> Result<AiModel, sqlx::Error> {
        let query = format!(
            "INSERT INTO ai_models (model_url, config) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AiModel>(&query)
            .bind(&input.model_url)
            .bind(&input.config)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AiModel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ai_models WHERE id = $1");
        sqlx::query_as::<_, AiModel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Every model with the dictionary items that reference it, newest
    /// model first.
    pub async fn list_with_items(pool: &PgPool) -> Result<Vec<AiModelWithItems>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ai_models ORDER BY created_at DESC, id DESC");
        let models = sqlx::query_as::<_, AiModel>(&query).fetch_all(pool).await?;

        let mut usage: HashMap<DbId, Vec<AiModelUsage>> = HashMap::new();
        for row in Self::usage(pool, None).await? {
            usage.entry(row.ai_model_id).or_default().push(row);
        }

        Ok(models
            .into_iter()
            .map(|model| AiModelWithItems {
                dictionary_items: usage.remove(&model.id).unwrap_or_default(),
                model,
            })
            .collect())
    }

    pub async fn find_with_items(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AiModelWithItems>, sqlx::Error> {
        let Some(model) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let dictionary_items = Self::usage(pool, Some(id)).await?;
        Ok(Some(AiModelWithItems {
            model,
            dictionary_items,
        }))
    }

    /// Dictionary items referencing models, optionally one model only.
    pub async fn usage(
        pool: &PgPool,
        model_id: Option<DbId>,
    ) -> Result<Vec<AiModelUsage>, sqlx::Error> {
        sqlx::query_as::<_, AiModelUsage>(
            "SELECT ai_model_id, id, word FROM dictionary_items
             WHERE ai_model_id IS NOT NULL AND ($1::BIGINT IS NULL OR ai_model_id = $1)
             ORDER BY id ASC",
        )
        .bind(model_id)
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAiModel,
    ) -> Result<Option<AiModel>, sqlx::Error> {
        let query = format!(
            "UPDATE ai_models SET
                model_url = COALESCE($2, model_url),
                config = COALESCE($3, config)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AiModel>(&query)
            .bind(id)
            .bind(&input.model_url)
            .bind(&input.config)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ai_models WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
