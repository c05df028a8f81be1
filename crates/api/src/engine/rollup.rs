//! Lesson → module → course completion roll-up.
//!
//! A lesson's first completion grants its XP, recomputes the module row and
//! recomputes the course enrollment, all in one transaction. Repeat
//! completions and un-completions only update the lesson row.

use lisan_core::gamification::XpGrant;
use lisan_core::progress::{completion_percentage, course_status, module_is_complete};
use lisan_core::quests::ACTION_COMPLETE_LESSON;
use lisan_core::types::DbId;
use lisan_db::models::achievement::Achievement;
use lisan_db::models::enrollment::Enrollment;
use lisan_db::models::progress::{LessonProgress, ModuleProgress};
use lisan_db::repositories::{
    EnrollmentRepo, LessonProgressRepo, LessonRepo, ModuleProgressRepo, ModuleRepo,
};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::engine::achievements::check_after_commit;
use crate::engine::non_fatal::non_fatal;
use crate::engine::quests::record_action;
use crate::engine::xp::{grant_xp_in, xp_metrics};
use crate::error::{AppError, AppResult};

/// Body of `POST /progress/lessons`.
#[derive(Debug, Deserialize)]
pub struct LessonProgressInput {
    pub course_id: DbId,
    pub module_id: DbId,
    pub lesson_id: DbId,
    pub is_completed: bool,
    pub last_position_seconds: Option<i32>,
}

/// Everything a lesson progress update changed.
#[derive(Debug, Serialize)]
pub struct LessonProgressOutcome {
    pub lesson_progress: LessonProgress,
    pub newly_completed: bool,
    pub xp: Option<XpGrant>,
    /// Module completion after the roll-up; `None` when no roll-up ran.
    pub module_completed: Option<bool>,
    pub course: Option<Enrollment>,
    pub achievements_unlocked: Vec<Achievement>,
}

/// Record a user's progress on a lesson and roll completion up.
pub async fn record_lesson_progress(
    pool: &PgPool,
    user_id: DbId,
    input: &LessonProgressInput,
) -> AppResult<LessonProgressOutcome> {
    if input.last_position_seconds.is_some_and(|p| p < 0) {
        return Err(AppError::BadRequest(
            "last_position_seconds must not be negative".into(),
        ));
    }

    let scope = LessonRepo::find_scope(pool, input.lesson_id)
        .await?
        .ok_or_else(|| AppError::not_found("Lesson", input.lesson_id))?;
    if scope.module_id != input.module_id {
        return Err(AppError::BadRequest(format!(
            "Lesson {} does not belong to module {}",
            input.lesson_id, input.module_id
        )));
    }
    if scope.course_id != input.course_id {
        return Err(AppError::BadRequest(format!(
            "Module {} does not belong to course {}",
            input.module_id, input.course_id
        )));
    }

    let mut tx = pool.begin().await?;
    let upsert = LessonProgressRepo::upsert(
        &mut tx,
        user_id,
        scope.lesson_id,
        input.is_completed,
        input.last_position_seconds,
    )
    .await?;

    let mut outcome = LessonProgressOutcome {
        lesson_progress: upsert.progress,
        newly_completed: upsert.newly_completed,
        xp: None,
        module_completed: None,
        course: None,
        achievements_unlocked: Vec::new(),
    };

    if upsert.newly_completed {
        let grant = grant_xp_in(&mut tx, user_id, i64::from(scope.xp_reward)).await?;
        let module = recompute_module(&mut tx, user_id, scope.module_id).await?;
        let enrollment = recompute_course(&mut tx, user_id, scope.course_id).await?;

        outcome.xp = Some(grant);
        outcome.module_completed = Some(module.is_completed);
        outcome.course = Some(enrollment);
    }
    tx.commit().await?;

    if let Some(grant) = &outcome.xp {
        tracing::info!(
            user_id,
            lesson_id = scope.lesson_id,
            xp = scope.xp_reward,
            module_completed = outcome.module_completed,
            "Lesson completed"
        );
        outcome.achievements_unlocked = check_after_commit(pool, user_id, xp_metrics(grant)).await;
        non_fatal(
            "quest progress",
            record_action(pool, user_id, ACTION_COMPLETE_LESSON),
        )
        .await;
    }

    Ok(outcome)
}

/// Re-derive a module row from the user's lesson rows.
pub async fn recompute_module(
    conn: &mut PgConnection,
    user_id: DbId,
    module_id: DbId,
) -> Result<ModuleProgress, sqlx::Error> {
    let counts = LessonProgressRepo::module_counts(&mut *conn, user_id, module_id).await?;
    let complete = module_is_complete(counts.published, counts.completed);
    ModuleProgressRepo::upsert(&mut *conn, user_id, module_id, complete).await
}

/// Re-derive the course enrollment from the user's lesson rows across the
/// course's published modules.
pub async fn recompute_course(
    conn: &mut PgConnection,
    user_id: DbId,
    course_id: DbId,
) -> Result<Enrollment, sqlx::Error> {
    let counts = LessonProgressRepo::course_counts(&mut *conn, user_id, course_id).await?;
    let percentage = completion_percentage(counts.completed, counts.published);
    EnrollmentRepo::upsert_rollup(
        &mut *conn,
        user_id,
        course_id,
        percentage,
        course_status(counts.completed, counts.published),
    )
    .await
}

/// Result of an admin recompute.
#[derive(Debug, Serialize)]
pub struct RecomputeOutcome {
    pub modules: Vec<ModuleProgress>,
    pub enrollment: Enrollment,
}

/// Rebuild every module row and the enrollment of one user in one course.
pub async fn recompute_for_user(
    pool: &PgPool,
    user_id: DbId,
    course_id: DbId,
) -> AppResult<RecomputeOutcome> {
    let mut tx = pool.begin().await?;
    let module_ids = ModuleRepo::ids_by_course(&mut *tx, course_id).await?;

    let mut modules = Vec::with_capacity(module_ids.len());
    for module_id in module_ids {
        modules.push(recompute_module(&mut tx, user_id, module_id).await?);
    }
    let enrollment = recompute_course(&mut tx, user_id, course_id).await?;
    tx.commit().await?;

    tracing::info!(
        user_id,
        course_id,
        modules = modules.len(),
        progress = enrollment.progress_percentage,
        "Course progress recomputed"
    );
    Ok(RecomputeOutcome {
        modules,
        enrollment,
    })
}

/// Result of an admin progress reset.
#[derive(Debug, Serialize)]
pub struct ResetOutcome {
    pub lessons_deleted: u64,
    pub modules_deleted: u64,
    pub enrollment: Option<Enrollment>,
}

/// Delete a user's lesson and module rows in a course and reset the
/// enrollment to 0%.
pub async fn reset_course_progress(
    pool: &PgPool,
    user_id: DbId,
    course_id: DbId,
) -> AppResult<ResetOutcome> {
    let mut tx = pool.begin().await?;
    let lessons_deleted = LessonProgressRepo::delete_for_course(&mut *tx, user_id, course_id).await?;
    let modules_deleted = ModuleProgressRepo::delete_for_course(&mut *tx, user_id, course_id).await?;
    let enrollment = EnrollmentRepo::reset_progress(&mut *tx, user_id, course_id).await?;
    tx.commit().await?;

    tracing::info!(user_id, course_id, lessons_deleted, modules_deleted, "Course progress reset");
    Ok(ResetOutcome {
        lessons_deleted,
        modules_deleted,
        enrollment,
    })
}
