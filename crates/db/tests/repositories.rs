//! Repository behaviour that the handlers rely on: identity checks, XP row
//! locking, the enrollment roll-up upsert, level lookup and streak rows.

use lisan_db::models::course::CreateCourse;
use lisan_db::models::course_module::CreateCourseModule;
use lisan_db::models::lesson::CreateLesson;
use lisan_db::models::user::{CreateUser, User};
use lisan_db::repositories::{
    CourseRepo, EnrollmentRepo, LessonProgressRepo, LessonRepo, LevelBoundaryRepo, ModuleRepo,
    StreakRepo, UserRepo,
};
use sqlx::PgPool;

async fn create_user(pool: &PgPool, username: &str, role: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            email: format!("{username}@lisan.test"),
            username: username.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            full_name: None,
            role: role.to_string(),
            is_verified: false,
        },
    )
    .await
    .unwrap()
}

/// One published course with one module of two published lessons.
async fn create_course(pool: &PgPool) -> (i64, i64, Vec<i64>) {
    let course = CourseRepo::create(
        pool,
        &CreateCourse {
            title: "Everyday Signs".to_string(),
            slug: "everyday-signs".to_string(),
            description: None,
            thumbnail_url: None,
            level: "beginner".to_string(),
            price: 0,
            is_published: true,
        },
    )
    .await
    .unwrap();

    let module = ModuleRepo::create(
        pool,
        &CreateCourseModule {
            course_id: course.id,
            title: "Greetings".to_string(),
            slug: "greetings".to_string(),
            description: None,
            thumbnail_url: None,
            order_index: 0,
            is_published: true,
        },
    )
    .await
    .unwrap();

    let mut lesson_ids = Vec::new();
    for (index, slug) in ["hello", "goodbye"].iter().enumerate() {
        let lesson = LessonRepo::create(
            pool,
            &CreateLesson {
                module_id: module.id,
                title: slug.to_string(),
                slug: slug.to_string(),
                description: None,
                lesson_type: "video".to_string(),
                target_gesture: None,
                content_url: None,
                order_index: index as i32,
                xp_reward: 10,
                is_published: true,
            },
        )
        .await
        .unwrap();
        lesson_ids.push(lesson.id);
    }

    (course.id, module.id, lesson_ids)
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn new_users_start_at_level_one(pool: PgPool) {
    let user = create_user(&pool, "layla", "user").await;

    assert_eq!(user.xp, 0);
    assert_eq!(user.total_xp, 0);
    assert_eq!(user.level, 1);
    assert!(!user.is_verified);
    assert!(!user.is_premium);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn identity_clash_ignores_the_excluded_user(pool: PgPool) {
    let layla = create_user(&pool, "layla", "user").await;
    create_user(&pool, "omar", "user").await;

    let clash = UserRepo::find_identity_clash(&pool, Some("layla@lisan.test"), Some("omar"), None)
        .await
        .unwrap();
    assert!(clash.email_taken);
    assert!(clash.username_taken);

    let own = UserRepo::find_identity_clash(&pool, Some("layla@lisan.test"), None, Some(layla.id))
        .await
        .unwrap();
    assert!(!own.email_taken);
    assert!(!own.username_taken);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn xp_counters_are_written_under_lock(pool: PgPool) {
    let user = create_user(&pool, "layla", "user").await;

    let mut tx = pool.begin().await.unwrap();
    let state = UserRepo::lock_xp(&mut *tx, user.id).await.unwrap().unwrap();
    assert_eq!(state.total_xp, 0);
    UserRepo::set_xp(&mut *tx, user.id, 1200, 1200, 2).await.unwrap();
    tx.commit().await.unwrap();

    let reloaded = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.total_xp, 1200);
    assert_eq!(reloaded.level, 2);

    let missing = UserRepo::lock_xp(&pool, user.id + 1000).await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn user_stats_count_roles_and_verification(pool: PgPool) {
    create_user(&pool, "admin", "admin").await;
    let layla = create_user(&pool, "layla", "user").await;
    UserRepo::mark_verified(&pool, layla.id).await.unwrap();

    let stats = UserRepo::stats(&pool).await.unwrap();
    assert_eq!(stats.total_users, 2);
    assert_eq!(stats.admins, 1);
    assert_eq!(stats.verified_users, 1);
    assert_eq!(stats.active_users, 0);
}

// ---------------------------------------------------------------------------
// Enrollments and lesson progress
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_enrollment_hits_unique_constraint(pool: PgPool) {
    let user = create_user(&pool, "layla", "user").await;
    let (course_id, _, _) = create_course(&pool).await;

    let enrollment = EnrollmentRepo::create(&pool, user.id, course_id, Some("PROMO"))
        .await
        .unwrap();
    assert_eq!(enrollment.status, "active");
    assert_eq!(enrollment.progress_percentage, 0);

    let err = EnrollmentRepo::create(&pool, user.id, course_id, None)
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_enrollments_user_course"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rollup_creates_then_completes_then_reopens(pool: PgPool) {
    let user = create_user(&pool, "layla", "user").await;
    let (course_id, _, _) = create_course(&pool).await;

    let created = EnrollmentRepo::upsert_rollup(&pool, user.id, course_id, 50, "active")
        .await
        .unwrap();
    assert_eq!(created.progress_percentage, 50);
    assert!(created.completed_at.is_none());

    let completed = EnrollmentRepo::upsert_rollup(&pool, user.id, course_id, 100, "completed")
        .await
        .unwrap();
    assert_eq!(completed.id, created.id);
    let stamped = completed.completed_at.unwrap();

    // A second completion keeps the original timestamp.
    let again = EnrollmentRepo::upsert_rollup(&pool, user.id, course_id, 100, "completed")
        .await
        .unwrap();
    assert_eq!(again.completed_at, Some(stamped));

    let reopened = EnrollmentRepo::upsert_rollup(&pool, user.id, course_id, 50, "active")
        .await
        .unwrap();
    assert!(reopened.completed_at.is_none());

    let reset = EnrollmentRepo::reset_progress(&pool, user.id, course_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reset.progress_percentage, 0);
    assert_eq!(reset.status, "active");

    let none = EnrollmentRepo::reset_progress(&pool, user.id, course_id + 1000)
        .await
        .unwrap();
    assert!(none.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lesson_upsert_reports_first_completion_only(pool: PgPool) {
    let user = create_user(&pool, "layla", "user").await;
    let (course_id, module_id, lesson_ids) = create_course(&pool).await;

    let mut tx = pool.begin().await.unwrap();
    let watched = LessonProgressRepo::upsert(&mut *tx, user.id, lesson_ids[0], false, Some(42))
        .await
        .unwrap();
    assert!(!watched.newly_completed);
    assert_eq!(watched.progress.last_position_seconds, 42);

    let first = LessonProgressRepo::upsert(&mut *tx, user.id, lesson_ids[0], true, None)
        .await
        .unwrap();
    assert!(first.newly_completed);
    assert!(first.progress.completed_at.is_some());
    assert_eq!(first.progress.last_position_seconds, 42);

    let second = LessonProgressRepo::upsert(&mut *tx, user.id, lesson_ids[0], true, None)
        .await
        .unwrap();
    assert!(!second.newly_completed);
    tx.commit().await.unwrap();

    let module = LessonProgressRepo::module_counts(&pool, user.id, module_id)
        .await
        .unwrap();
    assert_eq!(module.published, 2);
    assert_eq!(module.completed, 1);

    let course = LessonProgressRepo::course_counts(&pool, user.id, course_id)
        .await
        .unwrap();
    assert_eq!(course.published, 2);
    assert_eq!(course.completed, 1);
}

// ---------------------------------------------------------------------------
// Levels and streaks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn level_lookup_picks_highest_reached_boundary(pool: PgPool) {
    let cases = [(0, 1), (999, 1), (1000, 2), (2500, 3), (50_000, 10)];
    for (total_xp, expected) in cases {
        let found = LevelBoundaryRepo::lookup(&pool, total_xp).await.unwrap().unwrap();
        assert_eq!(found.level, expected, "total_xp {total_xp}");
    }

    let updated = LevelBoundaryRepo::upsert(&pool, 2, 1500).await.unwrap();
    assert_eq!(updated.min_xp, 1500);
    let found = LevelBoundaryRepo::lookup(&pool, 1200).await.unwrap().unwrap();
    assert_eq!(found.level, 1);

    assert_eq!(LevelBoundaryRepo::list(&pool).await.unwrap().len(), 10);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn streak_row_is_created_once(pool: PgPool) {
    let user = create_user(&pool, "layla", "user").await;

    assert!(StreakRepo::find_by_user(&pool, user.id).await.unwrap().is_none());

    let first = StreakRepo::get_or_create(&pool, user.id).await.unwrap();
    assert_eq!(first.current_streak, 0);
    assert_eq!(first.longest_streak, 0);
    assert!(first.last_activity_date.is_none());

    let second = StreakRepo::get_or_create(&pool, user.id).await.unwrap();
    assert_eq!(second.id, first.id);

    let mut tx = pool.begin().await.unwrap();
    let locked = StreakRepo::lock_or_create(&mut *tx, user.id).await.unwrap();
    assert_eq!(locked.id, first.id);
    tx.commit().await.unwrap();

    assert_eq!(StreakRepo::count(&pool).await.unwrap(), 1);
}
