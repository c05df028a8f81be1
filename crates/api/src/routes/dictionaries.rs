//! Route definitions for `/dictionaries`, `/learning` and `/quizzes`.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{dictionaries, learning, quizzes};
use crate::state::AppState;

/// Routes mounted at `/dictionaries`.
///
/// ```text
/// GET    /              -> list_dictionaries
/// POST   /              -> create_dictionary (admin)
/// GET    /{id}          -> get_dictionary
/// PATCH  /{id}          -> update_dictionary (admin)
/// DELETE /{id}          -> delete_dictionary (admin)
/// GET    /{id}/items    -> list_items
/// POST   /items         -> create_item (admin)
/// GET    /items/{id}    -> get_item
/// PATCH  /items/{id}    -> update_item (admin)
/// DELETE /items/{id}    -> delete_item (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(dictionaries::list_dictionaries).post(dictionaries::create_dictionary),
        )
        .route("/items", post(dictionaries::create_item))
        .route(
            "/items/{id}",
            get(dictionaries::get_item)
                .patch(dictionaries::update_item)
                .delete(dictionaries::delete_item),
        )
        .route(
            "/{id}",
            get(dictionaries::get_dictionary)
                .patch(dictionaries::update_dictionary)
                .delete(dictionaries::delete_dictionary),
        )
        .route("/{id}/items", get(dictionaries::list_items))
}

/// Routes mounted at `/learning`. All require auth.
///
/// ```text
/// GET  /due     -> due_items (?limit=)
/// POST /submit  -> submit
/// GET  /stats   -> stats
/// ```
pub fn learning_router() -> Router<AppState> {
    Router::new()
        .route("/due", get(learning::due_items))
        .route("/submit", post(learning::submit))
        .route("/stats", get(learning::stats))
}

/// Routes mounted at `/quizzes`.
///
/// ```text
/// POST   /                 -> create_quiz (admin)
/// GET    /item/{item_id}   -> list_for_item
/// DELETE /{id}             -> delete_quiz (admin)
/// ```
pub fn quizzes_router() -> Router<AppState> {
    Router::new()
        .route("/", post(quizzes::create_quiz))
        .route("/item/{item_id}", get(quizzes::list_for_item))
        .route("/{id}", delete(quizzes::delete_quiz))
}
