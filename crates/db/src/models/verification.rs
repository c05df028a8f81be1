//! Email verification token rows.

use lisan_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from `verification_tokens`. Only the SHA-256 digest of the code is
/// stored.
#[derive(Debug, Clone, FromRow)]
pub struct VerificationToken {
    pub id: DbId,
    pub user_id: DbId,
    pub code_hash: String,
    pub token_type: String,
    pub expires_at: Timestamp,
    pub used_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
