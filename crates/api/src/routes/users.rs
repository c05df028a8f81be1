//! Route definitions for the `/users` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /stats      -> stats (admin)
/// PUT    /me         -> update_me
/// DELETE /me         -> delete_me
/// GET    /           -> list_users (admin)
/// POST   /           -> create_user (admin)
/// GET    /{id}       -> get_user
/// PUT    /{id}       -> update_user (admin)
/// DELETE /{id}       -> delete_user (admin)
/// POST   /{id}/xp    -> grant_xp (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(users::stats))
        .route("/me", put(users::update_me).delete(users::delete_me))
        .route("/", get(users::list_users).post(users::create_user))
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/{id}/xp", post(users::grant_xp))
}
