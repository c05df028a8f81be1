//! Integration tests for XP grants, levels, achievements, leaderboards,
//! streaks and daily quests.

mod common;

use axum::http::StatusCode;
use common::{expect_data, get, get_auth, post_json_auth, put_json_auth};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn grant_xp(app: &axum::Router, admin_token: &str, user_id: i64, amount: i64) -> Value {
    expect_data(
        post_json_auth(
            app.clone(),
            &format!("/api/v1/users/{user_id}/xp"),
            json!({ "amount": amount }),
            admin_token,
        )
        .await,
        StatusCode::OK,
    )
    .await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn xp_grant_levels_up_and_unlocks_achievements(pool: PgPool) {
    let (_, admin_token) = common::admin(&pool).await;
    let (learner, token) = common::learner(&pool, "learner").await;
    let app = common::build_test_app(pool);

    let achievement = expect_data(
        post_json_auth(
            app.clone(),
            "/api/v1/achievements",
            json!({
                "title": "First Thousand",
                "category": "learning",
                "type": "XP_REACHED",
                "target_value": 1000,
                "xp_reward": 100,
            }),
            &admin_token,
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(achievement["slug"], "first-thousand");
    let achievement_id = achievement["id"].as_i64().unwrap();

    let first = grant_xp(&app, &admin_token, learner.id, 1500).await;
    assert_eq!(first["total_xp"], 1500);
    assert_eq!(first["old_level"], 1);
    assert_eq!(first["new_level"], 2);
    assert_eq!(first["leveled_up"], true);
    let unlocked = first["achievements_unlocked"].as_array().unwrap();
    assert_eq!(unlocked.len(), 1);
    assert_eq!(unlocked[0]["id"], achievement_id);

    // Already owned: no second unlock and no double grant.
    let second = grant_xp(&app, &admin_token, learner.id, 10).await;
    assert!(second["achievements_unlocked"].as_array().unwrap().is_empty());
    assert_eq!(second["leveled_up"], false);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/achievements/grant",
        json!({ "user_id": learner.id, "achievement_id": achievement_id }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let mine = expect_data(get_auth(app.clone(), "/api/v1/achievements/me", &token).await, StatusCode::OK).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);

    let progress = expect_data(get_auth(app.clone(), "/api/v1/levels/progress", &token).await, StatusCode::OK).await;
    assert_eq!(progress["total_xp"], 1510);
    assert_eq!(progress["level"], 2);
    assert_eq!(progress["current_xp"], 510);

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/users/{}/xp", learner.id),
        json!({ "amount": 0 }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app,
        "/api/v1/users/999999/xp",
        json!({ "amount": 10 }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn achievement_type_is_validated(pool: PgPool) {
    let (_, admin_token) = common::admin(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/achievements",
        json!({ "title": "Odd", "type": "WORDS_LEARNED", "target_value": 5 }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn level_boundaries_lookup_and_upsert(pool: PgPool) {
    let (_, admin_token) = common::admin(&pool).await;
    let app = common::build_test_app(pool);

    let levels = expect_data(get(app.clone(), "/api/v1/levels").await, StatusCode::OK).await;
    let levels = levels.as_array().unwrap();
    assert_eq!(levels.len(), 10);
    assert_eq!(levels[0]["level"], 1);
    assert_eq!(levels[0]["min_xp"], 0);

    let found = expect_data(get(app.clone(), "/api/v1/levels/lookup?total_xp=2500").await, StatusCode::OK).await;
    assert_eq!(found["level"], 3);

    let saved = expect_data(
        put_json_auth(app.clone(), "/api/v1/levels/11", json!({ "min_xp": 10000 }), &admin_token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(saved["level"], 11);

    let found = expect_data(get(app.clone(), "/api/v1/levels/lookup?total_xp=10500").await, StatusCode::OK).await;
    assert_eq!(found["level"], 11);

    let response = put_json_auth(app, "/api/v1/levels/0", json!({ "min_xp": 0 }), &admin_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn leaderboard_ranks_with_stable_tie_break(pool: PgPool) {
    let (_, admin_token) = common::admin(&pool).await;
    let (a, _) = common::learner(&pool, "alpha").await;
    let (b, _) = common::learner(&pool, "bravo").await;
    let (c, _) = common::learner(&pool, "charlie").await;
    let app = common::build_test_app(pool);

    grant_xp(&app, &admin_token, a.id, 300).await;
    grant_xp(&app, &admin_token, b.id, 300).await;
    grant_xp(&app, &admin_token, c.id, 900).await;

    let board = expect_data(get(app.clone(), "/api/v1/leaderboard?limit=10").await, StatusCode::OK).await;
    let items = board["items"].as_array().unwrap();
    assert_eq!(items[0]["user_id"], c.id);
    assert_eq!(items[0]["rank"], 1);
    assert_eq!(items[1]["user_id"], a.id);
    assert_eq!(items[2]["user_id"], b.id);
    assert_eq!(items[2]["rank"], 3);

    // Ranks continue across pages.
    let page_two = expect_data(get(app.clone(), "/api/v1/leaderboard?limit=2&page=2").await, StatusCode::OK).await;
    assert_eq!(page_two["items"][0]["rank"], 3);
    assert_eq!(page_two["meta"]["current_page"], 2);
    assert_eq!(page_two["meta"]["has_prev"], true);

    let response = get(app.clone(), "/api/v1/leaderboard?sort=level").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(app.clone(), "/api/v1/leaderboard/periodic?period=daily").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let weekly = expect_data(get(app, "/api/v1/leaderboard/periodic?period=weekly").await, StatusCode::OK).await;
    assert_eq!(weekly["meta"]["total_data"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn streak_hits_are_counted_once_per_day(pool: PgPool) {
    let (_, admin_token) = common::admin(&pool).await;
    let (_, token) = common::learner(&pool, "learner").await;
    let (other, _) = common::learner(&pool, "other").await;
    let app = common::build_test_app(pool);

    let mine = expect_data(get_auth(app.clone(), "/api/v1/streaks/me", &token).await, StatusCode::OK).await;
    assert_eq!(mine["current_streak"], 0);

    let hit = expect_data(post_json_auth(app.clone(), "/api/v1/streaks/hit", json!({}), &token).await, StatusCode::OK).await;
    assert_eq!(hit["transition"], "started");
    assert_eq!(hit["streak"]["current_streak"], 1);
    assert_eq!(hit["streak"]["longest_streak"], 1);
    let streak_id = hit["streak"]["id"].as_i64().unwrap();

    let again = expect_data(post_json_auth(app.clone(), "/api/v1/streaks/hit", json!({}), &token).await, StatusCode::OK).await;
    assert_eq!(again["transition"], "already_counted");
    assert_eq!(again["streak"]["current_streak"], 1);

    let placeholder = expect_data(
        get_auth(app.clone(), &format!("/api/v1/streaks/users/{}", other.id), &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(placeholder["current_streak"], 0);
    assert!(placeholder["last_activity_date"].is_null());

    let updated = expect_data(
        put_json_auth(
            app.clone(),
            &format!("/api/v1/streaks/{streak_id}"),
            json!({ "freeze_count": 2 }),
            &admin_token,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(updated["freeze_count"], 2);

    let response = put_json_auth(
        app,
        &format!("/api/v1/streaks/{streak_id}"),
        json!({ "current_streak": -1 }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn daily_quest_progress_and_claim(pool: PgPool) {
    let (_, admin_token) = common::admin(&pool).await;
    let (_, token) = common::learner(&pool, "learner").await;
    let (_, other_token) = common::learner(&pool, "other").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/quests",
        json!({ "title": "Show up", "action_type": "streak_hit", "target_count": 1, "xp_reward": 50 }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/quests",
        json!({ "title": "Bad", "action_type": "dance", "target_count": 1, "xp_reward": 5 }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let daily = expect_data(get_auth(app.clone(), "/api/v1/quests/daily", &token).await, StatusCode::OK).await;
    let quest = &daily.as_array().unwrap()[0];
    assert_eq!(quest["progress_count"], 0);
    assert_eq!(quest["is_completed"], false);
    let user_quest_id = quest["id"].as_i64().unwrap();
    let claim_uri = format!("/api/v1/quests/{user_quest_id}/claim");

    let response = post_json_auth(app.clone(), &claim_uri, json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    post_json_auth(app.clone(), "/api/v1/streaks/hit", json!({}), &token).await;

    let daily = expect_data(get_auth(app.clone(), "/api/v1/quests/daily", &token).await, StatusCode::OK).await;
    assert_eq!(daily[0]["progress_count"], 1);
    assert_eq!(daily[0]["is_completed"], true);

    // Another user cannot claim someone else's quest.
    let response = post_json_auth(app.clone(), &claim_uri, json!({}), &other_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let grant = expect_data(post_json_auth(app.clone(), &claim_uri, json!({}), &token).await, StatusCode::OK).await;
    assert_eq!(grant["total_xp"], 50);

    let response = post_json_auth(app, &claim_uri, json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
