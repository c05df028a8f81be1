//! Integration tests for user management and the admin-managed records:
//! announcements, FAQs, feedback, transactions, AI models and gesture logs.

mod common;

use axum::http::StatusCode;
use common::{
    delete_auth, expect_data, get, get_auth, patch_json_auth, post_json_auth, put_json_auth,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn profile_updates_and_admin_user_management(pool: PgPool) {
    let (_, admin_token) = common::admin(&pool).await;
    let (learner, token) = common::learner(&pool, "learner").await;
    common::learner(&pool, "taken").await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(app.clone(), "/api/v1/users/me", json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(app.clone(), "/api/v1/users/me", json!({ "username": "taken" }), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let me = expect_data(
        put_json_auth(app.clone(), "/api/v1/users/me", json!({ "full_name": "Layla" }), &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(me["full_name"], "Layla");

    let profile = expect_data(
        get_auth(app.clone(), &format!("/api/v1/users/{}", learner.id), &token).await,
        StatusCode::OK,
    )
    .await;
    assert!(profile.get("password_hash").is_none());

    let response = get_auth(app.clone(), "/api/v1/users", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let list = expect_data(
        get_auth(app.clone(), "/api/v1/users?search=LAYLA&limit=all", &admin_token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(list["meta"]["total_data"], 1);
    assert_eq!(list["items"][0]["id"], learner.id);

    let created = expect_data(
        post_json_auth(
            app.clone(),
            "/api/v1/users",
            json!({ "email": "new@lisan.test", "username": "newbie", "password": "long-enough-password" }),
            &admin_token,
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(created["is_verified"], true);
    assert_eq!(created["role"], "user");

    let stats = expect_data(get_auth(app.clone(), "/api/v1/users/stats", &admin_token).await, StatusCode::OK).await;
    assert_eq!(stats["total_users"], 4);
    assert_eq!(stats["admins"], 1);

    let response = delete_auth(app.clone(), "/api/v1/users/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = get_auth(app, &format!("/api/v1/users/{}", learner.id), &admin_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn announcements_and_faqs(pool: PgPool) {
    let (_, admin_token) = common::admin(&pool).await;
    let app = common::build_test_app(pool);

    for (title, active) in [("Ramadan schedule", true), ("Old news", false)] {
        let response = post_json_auth(
            app.clone(),
            "/api/v1/announcements",
            json!({ "title": title, "content": "Details inside", "is_active": active }),
            &admin_token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let active = expect_data(get(app.clone(), "/api/v1/announcements?is_active=true").await, StatusCode::OK).await;
    assert_eq!(active["meta"]["total_data"], 1);
    assert_eq!(active["items"][0]["title"], "Ramadan schedule");

    let stats = expect_data(get_auth(app.clone(), "/api/v1/announcements/stats", &admin_token).await, StatusCode::OK).await;
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["inactive"], 1);
    assert_eq!(stats["new_this_month"], 2);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/faqs",
        json!({ "question": "How?", "answer": "Like this.", "category": "billing" }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let faq = expect_data(
        post_json_auth(
            app.clone(),
            "/api/v1/faqs",
            json!({ "question": "How do I reset my password?", "answer": "Use the app.", "category": "account" }),
            &admin_token,
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let faq_id = faq["id"].as_i64().unwrap();

    let response = put_json_auth(app.clone(), &format!("/api/v1/faqs/{faq_id}"), json!({}), &admin_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let found = expect_data(get(app, "/api/v1/faqs?search=password&category=account").await, StatusCode::OK).await;
    assert_eq!(found["meta"]["total_data"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn feedback_and_transactions(pool: PgPool) {
    let (_, admin_token) = common::admin(&pool).await;
    let (_, token) = common::learner(&pool, "learner").await;
    let (_, other_token) = common::learner(&pool, "other").await;
    let app = common::build_test_app(pool);

    let feedback = expect_data(
        post_json_auth(app.clone(), "/api/v1/feedback", json!({ "message": "Video stutters" }), &token).await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(feedback["status"], "open");
    assert_eq!(feedback["type"], "bug");
    let feedback_id = feedback["id"].as_i64().unwrap();

    let response = get_auth(app.clone(), "/api/v1/feedback", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/feedback/{feedback_id}"),
        json!({ "status": "closed" }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let updated = expect_data(
        put_json_auth(
            app.clone(),
            &format!("/api/v1/feedback/{feedback_id}"),
            json!({ "status": "resolved", "admin_notes": "Fixed in 1.2" }),
            &admin_token,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(updated["status"], "resolved");

    let response = post_json_auth(
        app.clone(),
        "/api/v1/transactions",
        json!({ "amount": 0, "provider": "midtrans" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let transaction = expect_data(
        post_json_auth(
            app.clone(),
            "/api/v1/transactions",
            json!({ "amount": 49000, "provider": "midtrans", "metadata": { "plan": "monthly" } }),
            &token,
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(transaction["status"], "pending");
    let transaction_id = transaction["id"].as_i64().unwrap();
    let uri = format!("/api/v1/transactions/{transaction_id}");

    let response = get_auth(app.clone(), &uri, &other_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = get_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let paid = expect_data(
        put_json_auth(app.clone(), &uri, json!({ "status": "paid" }), &admin_token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(paid["status"], "paid");

    let listed = expect_data(get_auth(app, "/api/v1/transactions?status=paid", &admin_token).await, StatusCode::OK).await;
    assert_eq!(listed["meta"]["total_data"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ai_models_cannot_be_deleted_while_referenced(pool: PgPool) {
    let (_, admin_token) = common::admin(&pool).await;
    let (_, token) = common::learner(&pool, "learner").await;
    let app = common::build_test_app(pool);

    let model = expect_data(
        post_json_auth(
            app.clone(),
            "/api/v1/ai-models",
            json!({ "model_url": "https://models.lisan.test/v1.tflite", "config": { "threshold": 0.7 } }),
            &admin_token,
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let model_id = model["id"].as_i64().unwrap();

    let dictionary = expect_data(
        post_json_auth(app.clone(), "/api/v1/dictionaries", json!({ "title": "Numbers" }), &admin_token).await,
        StatusCode::CREATED,
    )
    .await;
    let item = expect_data(
        post_json_auth(
            app.clone(),
            "/api/v1/dictionaries/items",
            json!({
                "dictionary_id": dictionary["id"],
                "word": "One",
                "video_url": "https://cdn.lisan.test/one.mp4",
                "type": "number",
                "ai_model_id": model_id,
            }),
            &admin_token,
        )
        .await,
        StatusCode::CREATED,
    )
    .await;

    let detail = expect_data(get(app.clone(), &format!("/api/v1/ai-models/{model_id}")).await, StatusCode::OK).await;
    assert_eq!(detail["dictionary_items"][0]["word"], "One");

    let response = delete_auth(app.clone(), &format!("/api/v1/ai-models/{model_id}"), &admin_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = patch_json_auth(
        app.clone(),
        &format!("/api/v1/dictionaries/items/{}", item["id"]),
        json!({ "ai_model_id": 999_999 }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/gestures/logs",
        json!({ "detected_label": "one", "accuracy_score": 1.5 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let log = expect_data(
        post_json_auth(
            app.clone(),
            "/api/v1/gestures/logs",
            json!({
                "dictionary_item_id": item["id"],
                "detected_label": "one",
                "expected_label": "one",
                "accuracy_score": 0.92,
            }),
            &token,
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(log["detected_label"], "one");

    let response = delete_auth(app.clone(), &format!("/api/v1/dictionaries/items/{}", item["id"]), &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = delete_auth(app, &format!("/api/v1/ai-models/{model_id}"), &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}
