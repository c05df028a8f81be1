//! HTTP-level integration tests for registration, verification and login.

mod common;

use axum::http::StatusCode;
use common::{body_json, expect_data, get, get_auth, post_json};
use serde_json::json;
use sqlx::PgPool;

fn registration(username: &str) -> serde_json::Value {
    json!({
        "email": format!("{username}@Lisan.Test"),
        "username": username,
        "password": "long-enough-password",
        "full_name": "Test Learner",
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_verify_login_flow(pool: PgPool) {
    let (app, mailer) = common::build_test_app_with_mailer(pool);

    let data = expect_data(
        post_json(app.clone(), "/api/v1/auth/register", registration("rania")).await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(data["email"], "rania@lisan.test");

    // Unverified accounts cannot log in yet.
    let response = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "identifier": "rania", "password": "long-enough-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let code = mailer.last_code_for("rania@lisan.test").await.expect("code was sent");
    assert_eq!(code.len(), 6);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/verify",
        json!({ "email": "rania@lisan.test", "code": code }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = expect_data(
        post_json(
            app.clone(),
            "/api/v1/auth/login",
            json!({ "identifier": "RANIA@lisan.test", "password": "long-enough-password" }),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    let token = data["token"].as_str().unwrap().to_string();
    assert_eq!(data["user"]["username"], "rania");
    assert_eq!(data["user"]["is_verified"], true);
    assert!(data["user"].get("password_hash").is_none());

    let me = expect_data(get_auth(app, "/api/v1/auth/me", &token).await, StatusCode::OK).await;
    assert_eq!(me["email"], "rania@lisan.test");
    assert_eq!(me["level"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_duplicates_and_weak_passwords(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app.clone(), "/api/v1/auth/register", registration("omar")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(app.clone(), "/api/v1/auth/register", registration("omar")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let mut weak = registration("salma");
    weak["password"] = json!("short");
    let response = post_json(app, "/api/v1/auth/register", weak).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn verify_rejects_wrong_and_superseded_codes(pool: PgPool) {
    let (app, mailer) = common::build_test_app_with_mailer(pool);
    post_json(app.clone(), "/api/v1/auth/register", registration("yusuf")).await;
    let first = mailer.last_code_for("yusuf@lisan.test").await.unwrap();

    let response = post_json(
        app.clone(),
        "/api/v1/auth/send-code",
        json!({ "email": "yusuf@lisan.test" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let second = mailer.last_code_for("yusuf@lisan.test").await.unwrap();
    assert_eq!(mailer.sent().await.len(), 2);

    if first != second {
        let response = post_json(
            app.clone(),
            "/api/v1/auth/verify",
            json!({ "email": "yusuf@lisan.test", "code": first }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = post_json(
        app.clone(),
        "/api/v1/auth/verify",
        json!({ "email": "yusuf@lisan.test", "code": second }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        app,
        "/api/v1/auth/verify",
        json!({ "email": "yusuf@lisan.test", "code": second }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn verify_unknown_email_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/verify",
        json!({ "email": "ghost@lisan.test", "code": "123456" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_failures(pool: PgPool) {
    common::create_user(&pool, "amira", "user").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "identifier": "amira", "password": "not-the-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "identifier": "nobody", "password": common::TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn protected_routes_require_a_valid_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/v1/auth/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
