//! Tests for `AppError` → failure envelope mapping.
//!
//! Most call `IntoResponse` directly and need no database. The last few
//! send malformed requests through the router to check that extractor
//! rejections use the same envelope.

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use lisan_api::error::AppError;
use lisan_core::error::CoreError;
use serde_json::json;
use sqlx::PgPool;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let (status, json) = error_to_response(AppError::not_found("Course", 42)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Course with id 42 not found");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("title is required".into()));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "title is required");
    assert_eq!(json["error"], "Validation failed: title is required");
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let (status, json) = error_to_response(AppError::BadRequest("invalid field value".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "invalid field value");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let (status, json) = error_to_response(AppError::conflict("Already enrolled in this course")).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "Already enrolled in this course");
}

#[tokio::test]
async fn auth_errors_map_to_401_and_403() {
    let (status, _) = error_to_response(AppError::unauthorized("Invalid credentials")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = error_to_response(AppError::forbidden("Admin role required")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn internal_error_message_is_sanitized() {
    let (status, json) = error_to_response(AppError::InternalError("pool exhausted".into())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "An internal error occurred");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Resource not found");
}

#[test]
fn helpers_wrap_core_errors() {
    assert_matches!(
        AppError::not_found("Lesson", 7),
        AppError::Core(CoreError::NotFound { entity: "Lesson", id: 7 })
    );
    assert_matches!(AppError::conflict("taken"), AppError::Core(CoreError::Conflict(_)));
    assert_matches!(AppError::from(sqlx::Error::RowNotFound), AppError::Database(_));
}

// ---------------------------------------------------------------------------
// Extractor rejections
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn body_missing_a_field_is_a_400_envelope(pool: PgPool) {
    let (_, token) = common::learner(&pool, "layla").await;
    let app = common::build_test_app(pool);

    let response = common::post_json_auth(
        app,
        "/api/v1/progress/lessons",
        json!({ "course_id": 1, "module_id": 1, "lesson_id": 1 }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["message"].as_str().unwrap().contains("is_completed"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unparsable_query_value_is_a_400_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::get(app, "/api/v1/leaderboard?page=abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["message"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_numeric_path_id_is_a_400_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::get(app, "/api/v1/lessons/abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["message"].is_string());
}
