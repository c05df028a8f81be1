//! Route definitions for `/progress` and `/dictionary-progress`.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{dictionary_progress, progress};
use crate::state::AppState;

/// Routes mounted at `/progress`.
///
/// ```text
/// POST   /lessons                                -> update_lesson_progress
/// GET    /courses/{course_id}                    -> course_progress
/// POST   /courses/{course_id}/recompute          -> recompute_course (admin)
/// DELETE /courses/{course_id}/users/{user_id}    -> reset_course (admin)
/// GET    /dashboard                              -> dashboard
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/lessons", post(progress::update_lesson_progress))
        .route("/courses/{course_id}", get(progress::course_progress))
        .route(
            "/courses/{course_id}/recompute",
            post(progress::recompute_course),
        )
        .route(
            "/courses/{course_id}/users/{user_id}",
            delete(progress::reset_course),
        )
        .route("/dashboard", get(progress::dashboard))
}

/// Routes mounted at `/dictionary-progress`. All require auth.
///
/// ```text
/// GET  /                  -> list_progress
/// POST /items             -> update_item
/// GET  /stats             -> stats
/// POST /reset             -> reset
/// GET  /{dictionary_id}   -> get_progress
/// ```
pub fn dictionary_router() -> Router<AppState> {
    Router::new()
        .route("/", get(dictionary_progress::list_progress))
        .route("/items", post(dictionary_progress::update_item))
        .route("/stats", get(dictionary_progress::stats))
        .route("/reset", post(dictionary_progress::reset))
        .route("/{dictionary_id}", get(dictionary_progress::get_progress))
}
