//! Pure domain logic for the LISAN learning platform.
//!
//! Nothing in this crate touches the database or HTTP; every rule here is
//! unit-tested in isolation and reused by `lisan-db` and `lisan-api`.

pub mod accounts;
pub mod achievements;
pub mod content;
pub mod error;
pub mod gamification;
pub mod mastery;
pub mod pagination;
pub mod progress;
pub mod quests;
pub mod roles;
pub mod search;
pub mod slug;
pub mod streak;
pub mod support;
pub mod types;
pub mod validation;
