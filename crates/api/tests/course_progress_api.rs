//! Integration tests for the course tree, enrollments and the lesson →
//! module → course roll-up.

mod common;

use axum::http::StatusCode;
use common::{
    delete_auth, expect_data, get, get_auth, patch_json_auth, post_json_auth, put_json_auth,
};
use serde_json::{json, Value};
use sqlx::PgPool;

struct CourseFixture {
    course_id: i64,
    module_id: i64,
    lesson_ids: Vec<i64>,
}

/// Create one course with one module holding two 600 XP lessons.
async fn seed_course(app: &axum::Router, admin_token: &str) -> CourseFixture {
    let course = expect_data(
        post_json_auth(
            app.clone(),
            "/api/v1/courses",
            json!({ "title": "Everyday Signs", "level": "beginner", "is_published": true }),
            admin_token,
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(course["slug"], "everyday-signs");
    let course_id = course["id"].as_i64().unwrap();

    let module = expect_data(
        post_json_auth(
            app.clone(),
            "/api/v1/modules",
            json!({ "course_id": course_id, "title": "Greetings" }),
            admin_token,
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let module_id = module["id"].as_i64().unwrap();

    let mut lesson_ids = Vec::new();
    for (index, title) in ["Hello", "Goodbye"].iter().enumerate() {
        let lesson = expect_data(
            post_json_auth(
                app.clone(),
                "/api/v1/lessons",
                json!({
                    "module_id": module_id,
                    "title": title,
                    "type": "video",
                    "order_index": index,
                    "xp_reward": 600,
                }),
                admin_token,
            )
            .await,
            StatusCode::CREATED,
        )
        .await;
        lesson_ids.push(lesson["id"].as_i64().unwrap());
    }

    CourseFixture {
        course_id,
        module_id,
        lesson_ids,
    }
}

async fn complete_lesson(app: &axum::Router, token: &str, fx: &CourseFixture, lesson_id: i64) -> Value {
    expect_data(
        post_json_auth(
            app.clone(),
            "/api/v1/progress/lessons",
            json!({
                "course_id": fx.course_id,
                "module_id": fx.module_id,
                "lesson_id": lesson_id,
                "is_completed": true,
            }),
            token,
        )
        .await,
        StatusCode::OK,
    )
    .await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn course_detail_returns_ordered_tree(pool: PgPool) {
    let (_, admin_token) = common::admin(&pool).await;
    let app = common::build_test_app(pool);
    let fx = seed_course(&app, &admin_token).await;

    let detail = expect_data(get(app.clone(), "/api/v1/courses/everyday-signs").await, StatusCode::OK).await;
    assert_eq!(detail["id"], fx.course_id);
    let lessons = detail["modules"][0]["lessons"].as_array().unwrap();
    assert_eq!(lessons.len(), 2);
    assert_eq!(lessons[0]["title"], "Hello");
    assert_eq!(lessons[1]["title"], "Goodbye");
    assert!(lessons[0]["target_gesture"].is_null());

    let response = get(app, "/api/v1/courses/no-such-course").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn course_admin_rules(pool: PgPool) {
    let (_, admin_token) = common::admin(&pool).await;
    let (_, learner_token) = common::learner(&pool, "learner").await;
    let app = common::build_test_app(pool);
    let fx = seed_course(&app, &admin_token).await;

    // Learners cannot manage content.
    let response = post_json_auth(
        app.clone(),
        "/api/v1/courses",
        json!({ "title": "Sneaky" }),
        &learner_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Same title means same slug.
    let response = post_json_auth(
        app.clone(),
        "/api/v1/courses",
        json!({ "title": "Everyday  SIGNS!" }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/courses",
        json!({ "title": "Advanced", "level": "expert" }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Camera practice lessons need a target gesture.
    let response = post_json_auth(
        app.clone(),
        "/api/v1/lessons",
        json!({ "module_id": fx.module_id, "title": "Practice", "type": "camera_practice" }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let updated = expect_data(
        put_json_auth(
            app.clone(),
            &format!("/api/v1/courses/{}", fx.course_id),
            json!({ "title": "Daily Signs" }),
            &admin_token,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(updated["slug"], "daily-signs");

    let response = delete_auth(app.clone(), &format!("/api/v1/courses/{}", fx.course_id), &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = get(app, "/api/v1/courses/daily-signs").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn enrollment_lifecycle(pool: PgPool) {
    let (_, admin_token) = common::admin(&pool).await;
    let (_, token) = common::learner(&pool, "learner").await;
    let app = common::build_test_app(pool);
    let fx = seed_course(&app, &admin_token).await;

    let check = expect_data(
        get_auth(app.clone(), &format!("/api/v1/enrollments/check?course_id={}", fx.course_id), &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(check["is_enrolled"], false);

    let enrollment = expect_data(
        post_json_auth(
            app.clone(),
            "/api/v1/enrollments",
            json!({ "course_id": fx.course_id, "used_key": "  PROMO-1  " }),
            &token,
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(enrollment["status"], "active");
    assert_eq!(enrollment["progress_percentage"], 0);
    assert_eq!(enrollment["used_key"], "PROMO-1");

    let response = post_json_auth(
        app.clone(),
        "/api/v1/enrollments",
        json!({ "course_id": fx.course_id }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let check = expect_data(
        get_auth(app.clone(), &format!("/api/v1/enrollments/check?course_id={}", fx.course_id), &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(check["is_enrolled"], true);
    assert_eq!(check["status"], "active");

    // Marking completed forces 100% and stamps completed_at.
    let id = enrollment["id"].as_i64().unwrap();
    let patched = expect_data(
        patch_json_auth(
            app.clone(),
            &format!("/api/v1/enrollments/{id}"),
            json!({ "status": "completed" }),
            &admin_token,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(patched["progress_percentage"], 100);
    assert!(patched["completed_at"].is_string());

    let patched = expect_data(
        patch_json_auth(
            app.clone(),
            &format!("/api/v1/enrollments/{id}"),
            json!({ "status": "active", "progress_percentage": 40 }),
            &admin_token,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(patched["progress_percentage"], 40);
    assert!(patched["completed_at"].is_null());

    let response = patch_json_auth(
        app,
        &format!("/api/v1/enrollments/{id}"),
        json!({ "status": "paused" }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lesson_completion_rolls_up_to_course(pool: PgPool) {
    let (_, admin_token) = common::admin(&pool).await;
    let (learner, token) = common::learner(&pool, "learner").await;
    let app = common::build_test_app(pool);
    let fx = seed_course(&app, &admin_token).await;

    let first = complete_lesson(&app, &token, &fx, fx.lesson_ids[0]).await;
    assert_eq!(first["newly_completed"], true);
    assert_eq!(first["xp"]["total_xp"], 600);
    assert_eq!(first["xp"]["leveled_up"], false);
    assert_eq!(first["module_completed"], false);
    assert_eq!(first["course"]["progress_percentage"], 50);
    assert_eq!(first["course"]["status"], "active");

    // Completing the same lesson again grants nothing.
    let again = complete_lesson(&app, &token, &fx, fx.lesson_ids[0]).await;
    assert_eq!(again["newly_completed"], false);
    assert!(again["xp"].is_null());
    assert!(again["course"].is_null());

    let second = complete_lesson(&app, &token, &fx, fx.lesson_ids[1]).await;
    assert_eq!(second["xp"]["total_xp"], 1200);
    assert_eq!(second["xp"]["new_level"], 2);
    assert_eq!(second["xp"]["leveled_up"], true);
    assert_eq!(second["module_completed"], true);
    assert_eq!(second["course"]["progress_percentage"], 100);
    assert_eq!(second["course"]["status"], "completed");
    assert!(second["course"]["completed_at"].is_string());

    let progress = expect_data(
        get_auth(app.clone(), &format!("/api/v1/progress/courses/{}", fx.course_id), &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(progress["lessons"].as_array().unwrap().len(), 2);
    assert_eq!(progress["enrollment"]["status"], "completed");

    let dashboard = expect_data(get_auth(app.clone(), "/api/v1/progress/dashboard", &token).await, StatusCode::OK).await;
    assert_eq!(dashboard["user"]["total_xp"], 1200);
    assert_eq!(dashboard["user"]["level"], 2);

    // Admin reset clears the progress rows and zeroes the enrollment.
    let reset = expect_data(
        delete_auth(
            app.clone(),
            &format!("/api/v1/progress/courses/{}/users/{}", fx.course_id, learner.id),
            &admin_token,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(reset["lessons_deleted"], 2);
    assert_eq!(reset["enrollment"]["progress_percentage"], 0);

    // Recompute re-derives the same state from the (now empty) lesson rows.
    let recomputed = expect_data(
        post_json_auth(
            app,
            &format!("/api/v1/progress/courses/{}/recompute", fx.course_id),
            json!({ "user_id": learner.id }),
            &admin_token,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(recomputed["enrollment"]["progress_percentage"], 0);
    assert_eq!(recomputed["enrollment"]["status"], "active");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lesson_progress_rejects_mismatched_hierarchy(pool: PgPool) {
    let (_, admin_token) = common::admin(&pool).await;
    let (_, token) = common::learner(&pool, "learner").await;
    let app = common::build_test_app(pool);
    let fx = seed_course(&app, &admin_token).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/progress/lessons",
        json!({
            "course_id": fx.course_id,
            "module_id": fx.module_id + 1000,
            "lesson_id": fx.lesson_ids[0],
            "is_completed": true,
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app,
        "/api/v1/progress/lessons",
        json!({
            "course_id": fx.course_id,
            "module_id": fx.module_id,
            "lesson_id": fx.lesson_ids[0] + 1000,
            "is_completed": true,
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
