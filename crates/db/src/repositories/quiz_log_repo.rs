//! Repository for `quiz_logs`, the append-only answer history.

use sqlx::PgExecutor;

use crate::models::learning::{CreateQuizLog, QuizLog};

const COLUMNS: &str = "id, user_id, dictionary_item_id, quiz_type, is_correct, \
                       ai_confidence_score, xp_earned, created_at";

pub struct QuizLogRepo;

impl QuizLogRepo {
    pub async fn create<'e, E>(executor: E, input: &CreateQuizLog) -> Result<QuizLog, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO quiz_logs
                (user_id, dictionary_item_id, quiz_type, is_correct, ai_confidence_score, xp_earned)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuizLog>(&query)
            .bind(input.user_id)
            .bind(input.dictionary_item_id)
            .bind(&input.quiz_type)
            .bind(input.is_correct)
            .bind(input.ai_confidence_score)
            .bind(input.xp_earned)
            .fetch_one(executor)
            .await
    }
}
