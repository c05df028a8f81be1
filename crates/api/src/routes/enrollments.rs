//! Route definitions for the `/enrollments` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::enrollments;
use crate::state::AppState;

/// Routes mounted at `/enrollments`.
///
/// ```text
/// POST   /               -> enroll
/// GET    /               -> list_enrollments (admin)
/// GET    /me             -> my_enrollments
/// GET    /check          -> check_enrollment (?course_id=)
/// GET    /stats/courses  -> course_stats (admin)
/// GET    /stats/users    -> user_stats (admin)
/// GET    /{id}           -> get_enrollment (owner or admin)
/// PATCH  /{id}           -> patch_enrollment (admin)
/// DELETE /{id}           -> delete_enrollment (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(enrollments::list_enrollments).post(enrollments::enroll),
        )
        .route("/me", get(enrollments::my_enrollments))
        .route("/check", get(enrollments::check_enrollment))
        .route("/stats/courses", get(enrollments::course_stats))
        .route("/stats/users", get(enrollments::user_stats))
        .route(
            "/{id}",
            get(enrollments::get_enrollment)
                .patch(enrollments::patch_enrollment)
                .delete(enrollments::delete_enrollment),
        )
}
