//! Frequently asked questions.

use lisan_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `faqs`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Faq {
    pub id: DbId,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateFaq {
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateFaq {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateFaq {
    pub fn is_empty(&self) -> bool {
        self.question.is_none()
            && self.answer.is_none()
            && self.category.is_none()
            && self.is_active.is_none()
    }
}

pub const FAQ_SORT_COLUMNS: &[&str] = &["created_at", "updated_at", "question", "category"];

#[derive(Debug, Default)]
pub struct FaqFilter {
    /// `ILIKE` pattern on question and answer.
    pub search: Option<String>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
}
