//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches

pub mod achievement;
pub mod ai_model;
pub mod announcement;
pub mod course;
pub mod course_module;
pub mod dictionary;
pub mod enrollment;
pub mod faq;
pub mod feedback;
pub mod leaderboard;
pub mod learning;
pub mod lesson;
pub mod level;
pub mod progress;
pub mod quest;
pub mod quiz;
pub mod streak;
pub mod transaction;
pub mod user;
pub mod verification;
