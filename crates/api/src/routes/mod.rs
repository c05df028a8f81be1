pub mod auth;
pub mod content;
pub mod dictionaries;
pub mod enrollments;
pub mod gamification;
pub mod health;
pub mod progress;
pub mod support;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth                    register, verify, send-code, login, me
/// /users                   profile, admin user management, XP grants
///
/// /courses                 catalog (GET /{slug} returns the full tree)
/// /modules                 course modules
/// /lessons                 module lessons
/// /enrollments             enroll, membership checks, admin stats
/// /progress                lesson completion, course roll-up, dashboard
///
/// /dictionaries            dictionaries and their items
/// /dictionary-progress     per-dictionary completion
/// /learning                spaced-repetition queue and quiz submission
/// /quizzes                 per-item multiple-choice quizzes
///
/// /streaks                 daily streaks with freezes
/// /levels                  XP level thresholds
/// /leaderboard             live, periodic and streak boards
/// /achievements            catalog and grants
/// /quests                  daily quests and reward claims
///
/// /announcements           public notices
/// /faqs                    help center entries
/// /feedback                user reports
/// /transactions            payment records
/// /ai-models               recognition model registry
/// /gestures                recognition attempt logs
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/courses", content::courses_router())
        .nest("/modules", content::modules_router())
        .nest("/lessons", content::lessons_router())
        .nest("/enrollments", enrollments::router())
        .nest("/progress", progress::router())
        .nest("/dictionaries", dictionaries::router())
        .nest("/dictionary-progress", progress::dictionary_router())
        .nest("/learning", dictionaries::learning_router())
        .nest("/quizzes", dictionaries::quizzes_router())
        .nest("/streaks", gamification::streaks_router())
        .nest("/levels", gamification::levels_router())
        .nest("/leaderboard", gamification::leaderboard_router())
        .nest("/achievements", gamification::achievements_router())
        .nest("/quests", gamification::quests_router())
        .nest("/announcements", support::announcements_router())
        .nest("/faqs", support::faqs_router())
        .nest("/feedback", support::feedback_router())
        .nest("/transactions", support::transactions_router())
        .nest("/ai-models", support::ai_models_router())
        .nest("/gestures", support::gestures_router())
}
