//! Route definitions for the gamification surface: `/streaks`, `/levels`,
//! `/leaderboard`, `/achievements` and `/quests`.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{achievements, leaderboard, levels, quests, streaks};
use crate::state::AppState;

/// Routes mounted at `/streaks`.
///
/// ```text
/// GET    /                  -> list_streaks (admin)
/// GET    /me                -> my_streak
/// POST   /hit               -> hit_streak
/// GET    /users/{user_id}   -> user_streak
/// PUT    /{id}              -> update_streak (admin)
/// DELETE /{id}              -> delete_streak (admin)
/// ```
pub fn streaks_router() -> Router<AppState> {
    Router::new()
        .route("/", get(streaks::list_streaks))
        .route("/me", get(streaks::my_streak))
        .route("/hit", post(streaks::hit_streak))
        .route("/users/{user_id}", get(streaks::user_streak))
        .route(
            "/{id}",
            put(streaks::update_streak).delete(streaks::delete_streak),
        )
}

/// Routes mounted at `/levels`.
///
/// ```text
/// GET /           -> list_levels
/// GET /lookup     -> lookup_level (?total_xp=)
/// GET /progress   -> my_progress (requires auth)
/// PUT /{level}    -> upsert_level (admin)
/// ```
pub fn levels_router() -> Router<AppState> {
    Router::new()
        .route("/", get(levels::list_levels))
        .route("/lookup", get(levels::lookup_level))
        .route("/progress", get(levels::my_progress))
        .route("/{level}", put(levels::upsert_level))
}

/// Routes mounted at `/leaderboard`. All public.
///
/// ```text
/// GET /           -> live (?sort=xp|total_xp)
/// GET /periodic   -> periodic (?period=)
/// GET /streak     -> streak (?limit=)
/// ```
pub fn leaderboard_router() -> Router<AppState> {
    Router::new()
        .route("/", get(leaderboard::live))
        .route("/periodic", get(leaderboard::periodic))
        .route("/streak", get(leaderboard::streak))
}

/// Routes mounted at `/achievements`.
///
/// ```text
/// GET    /                  -> list_achievements (?category=)
/// POST   /                  -> create_achievement (admin)
/// POST   /grant             -> grant (admin)
/// GET    /me                -> my_achievements
/// GET    /users/{user_id}   -> user_achievements
/// DELETE /revoke/{id}       -> revoke (admin)
/// GET    /{id}              -> get_achievement
/// PUT    /{id}              -> update_achievement (admin)
/// DELETE /{id}              -> delete_achievement (admin)
/// ```
pub fn achievements_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(achievements::list_achievements).post(achievements::create_achievement),
        )
        .route("/grant", post(achievements::grant))
        .route("/me", get(achievements::my_achievements))
        .route("/users/{user_id}", get(achievements::user_achievements))
        .route("/revoke/{id}", delete(achievements::revoke))
        .route(
            "/{id}",
            get(achievements::get_achievement)
                .put(achievements::update_achievement)
                .delete(achievements::delete_achievement),
        )
}

/// Routes mounted at `/quests`.
///
/// ```text
/// POST /                        -> create_quest (admin)
/// GET  /daily                   -> daily_quests
/// POST /{user_quest_id}/claim   -> claim_reward
/// ```
pub fn quests_router() -> Router<AppState> {
    Router::new()
        .route("/", post(quests::create_quest))
        .route("/daily", get(quests::daily_quests))
        .route("/{user_quest_id}/claim", post(quests::claim_reward))
}
