//! Route definitions for admin-managed content and records:
//! `/announcements`, `/faqs`, `/feedback`, `/transactions`, `/ai-models`
//! and `/gestures`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{ai_models, announcements, faqs, feedback, gestures, transactions};
use crate::state::AppState;

/// Routes mounted at `/announcements`.
///
/// ```text
/// GET    /        -> list_announcements
/// POST   /        -> create_announcement (admin)
/// GET    /stats   -> stats (admin)
/// GET    /{id}    -> get_announcement
/// PUT    /{id}    -> update_announcement (admin)
/// DELETE /{id}    -> delete_announcement (admin)
/// ```
pub fn announcements_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(announcements::list_announcements).post(announcements::create_announcement),
        )
        .route("/stats", get(announcements::stats))
        .route(
            "/{id}",
            get(announcements::get_announcement)
                .put(announcements::update_announcement)
                .delete(announcements::delete_announcement),
        )
}

/// Routes mounted at `/faqs`.
///
/// ```text
/// GET    /      -> list_faqs
/// POST   /      -> create_faq (admin)
/// GET    /{id}  -> get_faq
/// PUT    /{id}  -> update_faq (admin)
/// DELETE /{id}  -> delete_faq (admin)
/// ```
pub fn faqs_router() -> Router<AppState> {
    Router::new()
        .route("/", get(faqs::list_faqs).post(faqs::create_faq))
        .route(
            "/{id}",
            get(faqs::get_faq)
                .put(faqs::update_faq)
                .delete(faqs::delete_faq),
        )
}

/// Routes mounted at `/feedback`.
///
/// ```text
/// POST   /      -> submit_feedback
/// GET    /      -> list_feedback (admin)
/// GET    /{id}  -> get_feedback (admin)
/// PUT    /{id}  -> update_feedback (admin)
/// DELETE /{id}  -> delete_feedback (admin)
/// ```
pub fn feedback_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(feedback::list_feedback).post(feedback::submit_feedback),
        )
        .route(
            "/{id}",
            get(feedback::get_feedback)
                .put(feedback::update_feedback)
                .delete(feedback::delete_feedback),
        )
}

/// Routes mounted at `/transactions`.
///
/// ```text
/// POST   /                  -> create_transaction
/// GET    /                  -> list_transactions (admin)
/// GET    /users/{user_id}   -> user_transactions (owner or admin)
/// GET    /{id}              -> get_transaction (owner or admin)
/// PUT    /{id}              -> update_transaction (admin)
/// DELETE /{id}              -> delete_transaction (admin)
/// ```
pub fn transactions_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(transactions::list_transactions).post(transactions::create_transaction),
        )
        .route("/users/{user_id}", get(transactions::user_transactions))
        .route(
            "/{id}",
            get(transactions::get_transaction)
                .put(transactions::update_transaction)
                .delete(transactions::delete_transaction),
        )
}

/// Routes mounted at `/ai-models`.
///
/// ```text
/// GET    /      -> list_models
/// POST   /      -> create_model (admin)
/// GET    /{id}  -> get_model
/// PUT    /{id}  -> update_model (admin)
/// DELETE /{id}  -> delete_model (admin)
/// ```
pub fn ai_models_router() -> Router<AppState> {
    Router::new()
        .route("/", get(ai_models::list_models).post(ai_models::create_model))
        .route(
            "/{id}",
            get(ai_models::get_model)
                .put(ai_models::update_model)
                .delete(ai_models::delete_model),
        )
}

/// Routes mounted at `/gestures`.
///
/// ```text
/// POST /logs  -> create_log
/// ```
pub fn gestures_router() -> Router<AppState> {
    Router::new().route("/logs", post(gestures::create_log))
}
