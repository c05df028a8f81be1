//! Route definitions for the course tree: `/courses`, `/modules` and
//! `/lessons`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{courses, lessons, modules};
use crate::state::AppState;

/// Routes mounted at `/courses`.
///
/// `GET /{id}` looks the course up by slug; `PUT` and `DELETE` take the
/// numeric id.
///
/// ```text
/// GET    /        -> list_courses
/// POST   /        -> create_course (admin)
/// GET    /{slug}  -> get_course (with modules and lessons)
/// PUT    /{id}    -> update_course (admin)
/// DELETE /{id}    -> delete_course (admin)
/// ```
pub fn courses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(courses::list_courses).post(courses::create_course))
        .route(
            "/{id}",
            get(courses::get_course)
                .put(courses::update_course)
                .delete(courses::delete_course),
        )
}

/// Routes mounted at `/modules`.
///
/// ```text
/// POST   /      -> create_module (admin)
/// GET    /{id}  -> get_module
/// PUT    /{id}  -> update_module (admin)
/// DELETE /{id}  -> delete_module (admin)
/// ```
pub fn modules_router() -> Router<AppState> {
    Router::new()
        .route("/", post(modules::create_module))
        .route(
            "/{id}",
            get(modules::get_module)
                .put(modules::update_module)
                .delete(modules::delete_module),
        )
}

/// Routes mounted at `/lessons`.
///
/// ```text
/// POST   /      -> create_lesson (admin)
/// GET    /{id}  -> get_lesson
/// PUT    /{id}  -> update_lesson (admin)
/// DELETE /{id}  -> delete_lesson (admin)
/// ```
pub fn lessons_router() -> Router<AppState> {
    Router::new()
        .route("/", post(lessons::create_lesson))
        .route(
            "/{id}",
            get(lessons::get_lesson)
                .put(lessons::update_lesson)
                .delete(lessons::delete_lesson),
        )
}
