//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Methods that take part in
//! multi-step writes accept any `PgExecutor` (or a `&mut PgConnection`
//! when they issue several statements) so callers can run them inside a
//! transaction.

pub mod achievement_repo;
pub mod ai_model_repo;
pub mod announcement_repo;
pub mod course_repo;
pub mod dictionary_item_repo;
pub mod dictionary_progress_repo;
pub mod dictionary_repo;
pub mod enrollment_repo;
pub mod faq_repo;
pub mod feedback_repo;
pub mod gesture_log_repo;
pub mod item_progress_repo;
pub mod leaderboard_repo;
pub mod lesson_progress_repo;
pub mod lesson_repo;
pub mod level_boundary_repo;
pub mod module_progress_repo;
pub mod module_repo;
pub mod quest_repo;
pub mod quiz_log_repo;
pub mod quiz_question_repo;
pub mod streak_repo;
pub mod transaction_repo;
pub mod user_repo;
pub mod verification_token_repo;

pub use achievement_repo::{AchievementRepo, UserAchievementRepo};
pub use ai_model_repo::AiModelRepo;
pub use announcement_repo::AnnouncementRepo;
pub use course_repo::CourseRepo;
pub use dictionary_item_repo::DictionaryItemRepo;
pub use dictionary_progress_repo::DictionaryProgressRepo;
pub use dictionary_repo::DictionaryRepo;
pub use enrollment_repo::EnrollmentRepo;
pub use faq_repo::FaqRepo;
pub use feedback_repo::FeedbackRepo;
pub use gesture_log_repo::GestureLogRepo;
pub use item_progress_repo::ItemProgressRepo;
pub use leaderboard_repo::LeaderboardRepo;
pub use lesson_progress_repo::LessonProgressRepo;
pub use lesson_repo::LessonRepo;
pub use level_boundary_repo::LevelBoundaryRepo;
pub use module_progress_repo::ModuleProgressRepo;
pub use module_repo::ModuleRepo;
pub use quest_repo::QuestRepo;
pub use quiz_log_repo::QuizLogRepo;
pub use quiz_question_repo::QuizQuestionRepo;
pub use streak_repo::StreakRepo;
pub use transaction_repo::TransactionRepo;
pub use user_repo::{IdentityClash, UserRepo};
pub use verification_token_repo::VerificationTokenRepo;
