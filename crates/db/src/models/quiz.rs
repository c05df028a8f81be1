//! Multiple-choice quiz questions attached to dictionary items.

use lisan_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from `quiz_questions`. `options` is a JSONB array of strings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuizQuestion {
    pub id: DbId,
    pub dictionary_item_id: DbId,
    pub question: String,
    pub options: Json<Vec<String>>,
    pub correct_answer: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateQuizQuestion {
    pub dictionary_item_id: DbId,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}
