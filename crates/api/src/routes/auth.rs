//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /register   -> register
/// POST /verify     -> verify
/// POST /send-code  -> send_code
/// POST /login      -> login
/// GET  /me         -> me (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/verify", post(auth::verify))
        .route("/send-code", post(auth::send_code))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me))
}
