//! Multi-step write flows shared by several handlers.
//!
//! Each flow runs its primary writes inside one transaction. Enrichment that
//! must never fail the request (achievement unlocks, quest progress) runs
//! after commit through [`non_fatal::non_fatal`].

pub mod achievements;
pub mod dictionary;
pub mod learning;
pub mod non_fatal;
pub mod quests;
pub mod rollup;
pub mod streak;
pub mod xp;

/// Current UTC calendar date, used for streaks and daily quests.
pub fn today() -> lisan_core::types::Date {
    chrono::Utc::now().date_naive()
}
