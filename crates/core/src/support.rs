//! Vocabularies for admin-managed records: FAQs, feedback, payment
//! transactions and periodic leaderboards.

use crate::error::CoreError;
use crate::validation::validate_choice;

// ---------------------------------------------------------------------------
// FAQ
// ---------------------------------------------------------------------------

pub const VALID_FAQ_CATEGORIES: &[&str] =
    &["general", "account", "subscription", "technical", "learning"];
pub const DEFAULT_FAQ_CATEGORY: &str = "general";

pub fn validate_faq_category(category: &str) -> Result<(), CoreError> {
    validate_choice("FAQ category", category, VALID_FAQ_CATEGORIES)
}

// ---------------------------------------------------------------------------
// Feedback
// ---------------------------------------------------------------------------

pub const VALID_FEEDBACK_TYPES: &[&str] = &["bug", "content_issue", "suggestion", "other"];
pub const DEFAULT_FEEDBACK_TYPE: &str = "bug";

pub const FEEDBACK_OPEN: &str = "open";
pub const VALID_FEEDBACK_STATUSES: &[&str] = &[FEEDBACK_OPEN, "in_progress", "resolved", "rejected"];

/// Maximum feedback message length (characters).
pub const MAX_FEEDBACK_MESSAGE_LENGTH: usize = 5_000;

pub fn validate_feedback_type(kind: &str) -> Result<(), CoreError> {
    validate_choice("feedback type", kind, VALID_FEEDBACK_TYPES)
}

pub fn validate_feedback_status(status: &str) -> Result<(), CoreError> {
    validate_choice("feedback status", status, VALID_FEEDBACK_STATUSES)
}

pub fn validate_feedback_message(message: &str) -> Result<(), CoreError> {
    let len = message.trim().chars().count();
    if len == 0 {
        return Err(CoreError::Validation("message is required".into()));
    }
    if len > MAX_FEEDBACK_MESSAGE_LENGTH {
        return Err(CoreError::Validation(format!(
            "message exceeds maximum length of {MAX_FEEDBACK_MESSAGE_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Payment transactions
// ---------------------------------------------------------------------------

pub const PAYMENT_PENDING: &str = "pending";
pub const VALID_PAYMENT_STATUSES: &[&str] = &[PAYMENT_PENDING, "paid", "failed", "expired"];

pub fn validate_payment_status(status: &str) -> Result<(), CoreError> {
    validate_choice("payment status", status, VALID_PAYMENT_STATUSES)
}

pub fn validate_amount(amount: i64) -> Result<(), CoreError> {
    if amount <= 0 {
        return Err(CoreError::Validation(format!(
            "amount must be positive (got {amount})"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Leaderboard periods
// ---------------------------------------------------------------------------

pub const PERIOD_ALL_TIME: &str = "all_time";
pub const VALID_PERIODS: &[&str] = &[PERIOD_ALL_TIME, "weekly", "monthly"];

pub fn validate_period(period: &str) -> Result<(), CoreError> {
    validate_choice("leaderboard period", period, VALID_PERIODS)
}

/// 1-based rank for the `index`-th row of a page starting at `offset`.
pub fn rank_for(offset: i64, index: usize) -> i64 {
    offset + index as i64 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faq_categories() {
        assert!(validate_faq_category(DEFAULT_FAQ_CATEGORY).is_ok());
        assert!(validate_faq_category("billing").is_err());
    }

    #[test]
    fn feedback_vocabulary() {
        assert!(validate_feedback_type("content_issue").is_ok());
        assert!(validate_feedback_type("praise").is_err());
        assert!(validate_feedback_status("in_progress").is_ok());
        assert!(validate_feedback_status("closed").is_err());
    }

    #[test]
    fn feedback_message_bounds() {
        assert!(validate_feedback_message("Video won't load").is_ok());
        assert!(validate_feedback_message("   ").is_err());
        let long = "x".repeat(MAX_FEEDBACK_MESSAGE_LENGTH + 1);
        assert!(validate_feedback_message(&long).is_err());
    }

    #[test]
    fn payments() {
        assert!(validate_payment_status("paid").is_ok());
        assert!(validate_payment_status("refunded").is_err());
        assert!(validate_amount(1).is_ok());
        assert!(validate_amount(0).is_err());
    }

    #[test]
    fn ranks_continue_across_pages() {
        assert_eq!(rank_for(0, 0), 1);
        assert_eq!(rank_for(20, 4), 25);
    }

    #[test]
    fn periods() {
        assert!(validate_period("weekly").is_ok());
        assert!(validate_period("daily").is_err());
    }
}
