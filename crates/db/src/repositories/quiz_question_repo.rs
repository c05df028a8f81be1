//! Repository for `quiz_questions`.

use lisan_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::quiz::{CreateQuizQuestion, QuizQuestion};

const COLUMNS: &str = "id, dictionary_item_id, question, options, correct_answer, \
                       created_at, updated_at";

pub struct QuizQuestionRepo;

impl QuizQuestionRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateQuizQuestion,
    ) -> Result<QuizQuestion, sqlx::Error> {
        let query = format!(
            "INSERT INTO quiz_questions (dictionary_item_id, question, options, correct_answer)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuizQuestion>(&query)
            .bind(input.dictionary_item_id)
            .bind(&input.question)
            .bind(Json(&input.options))
            .bind(&input.correct_answer)
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_item(
        pool: &PgPool,
        item_id: DbId,
    ) -> Result<Vec<QuizQuestion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quiz_questions WHERE dictionary_item_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, QuizQuestion>(&query)
            .bind(item_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quiz_questions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
