//! HTTP handlers, one module per resource.
//!
//! Handlers validate input, call repositories or an [`crate::engine`] flow,
//! and wrap the result in [`crate::response::ApiResponse`].

pub mod achievements;
pub mod ai_models;
pub mod announcements;
pub mod auth;
pub mod courses;
pub mod dictionaries;
pub mod dictionary_progress;
pub mod enrollments;
pub mod faqs;
pub mod feedback;
pub mod gestures;
pub mod leaderboard;
pub mod learning;
pub mod lessons;
pub mod levels;
pub mod modules;
pub mod progress;
pub mod quests;
pub mod quizzes;
pub mod streaks;
pub mod transactions;
pub mod users;
