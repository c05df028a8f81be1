//! Quiz submissions on dictionary items.
//!
//! One answer writes the quiz log, grants quiz XP, updates the item's
//! mastery schedule, rolls the dictionary up and counts towards the daily
//! streak. All of it commits together.

use lisan_core::achievements::AchievementMetrics;
use lisan_core::gamification::quiz_xp;
use lisan_core::mastery::apply_quiz_result;
use lisan_core::quests::{ACTION_STREAK_HIT, ACTION_SUBMIT_QUIZ};
use lisan_core::types::DbId;
use lisan_core::validation::require_text;
use lisan_db::models::achievement::Achievement;
use lisan_db::models::learning::{CreateQuizLog, DictionaryProgress, ItemProgress, ItemReview};
use lisan_db::repositories::{DictionaryItemRepo, ItemProgressRepo, QuizLogRepo};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::engine::achievements::check_after_commit;
use crate::engine::dictionary::recompute_dictionary;
use crate::engine::non_fatal::non_fatal;
use crate::engine::quests::record_action;
use crate::engine::streak::{hit_in, StreakHit};
use crate::engine::today;
use crate::engine::xp::grant_xp_in;
use crate::error::{AppError, AppResult};

/// Body of `POST /learning/submit`.
#[derive(Debug, Deserialize)]
pub struct QuizSubmission {
    pub dictionary_item_id: DbId,
    pub quiz_type: String,
    pub is_correct: bool,
    pub ai_confidence_score: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct QuizOutcome {
    pub xp_earned: i32,
    pub is_level_up: bool,
    pub new_level: i32,
    pub new_total_xp: i64,
    pub item_progress: ItemProgress,
    pub dictionary_progress: DictionaryProgress,
    pub streak: StreakHit,
    pub achievements_unlocked: Vec<Achievement>,
}

pub async fn submit_quiz(
    pool: &PgPool,
    user_id: DbId,
    input: &QuizSubmission,
) -> AppResult<QuizOutcome> {
    let quiz_type = require_text("quiz_type", &input.quiz_type)?;
    if let Some(score) = input.ai_confidence_score {
        if !(0.0..=1.0).contains(&score) {
            return Err(AppError::BadRequest(
                "ai_confidence_score must be between 0 and 1".into(),
            ));
        }
    }

    let item = DictionaryItemRepo::find_by_id(pool, input.dictionary_item_id)
        .await?
        .ok_or_else(|| AppError::not_found("DictionaryItem", input.dictionary_item_id))?;

    let xp_earned = quiz_xp(input.is_correct, input.ai_confidence_score);
    let now = chrono::Utc::now();

    let mut tx = pool.begin().await?;
    QuizLogRepo::create(
        &mut *tx,
        &CreateQuizLog {
            user_id,
            dictionary_item_id: item.id,
            quiz_type: quiz_type.to_string(),
            is_correct: input.is_correct,
            ai_confidence_score: input.ai_confidence_score,
            xp_earned,
        },
    )
    .await?;

    let grant = grant_xp_in(&mut tx, user_id, i64::from(xp_earned)).await?;

    let current = ItemProgressRepo::lock_or_create(&mut tx, user_id, item.id).await?;
    let mastery = apply_quiz_result(current.mastery_level, current.streak_count, input.is_correct, now);
    let item_progress = ItemProgressRepo::record_review(
        &mut *tx,
        user_id,
        item.id,
        &ItemReview {
            mastery_level: mastery.mastery_level,
            streak_count: mastery.streak_count,
            next_review_at: mastery.next_review_at,
        },
    )
    .await?;

    let dictionary_progress = recompute_dictionary(&mut tx, user_id, item.dictionary_id).await?;
    let streak = hit_in(&mut tx, user_id, today()).await?;
    tx.commit().await?;

    tracing::info!(
        user_id,
        item_id = item.id,
        is_correct = input.is_correct,
        xp_earned,
        mastery = mastery.mastery_level,
        "Quiz answer recorded"
    );

    let achievements_unlocked = check_after_commit(
        pool,
        user_id,
        AchievementMetrics {
            total_xp: Some(grant.total_xp),
            level: Some(grant.new_level),
            current_streak: Some(streak.streak.current_streak),
        },
    )
    .await;
    non_fatal("quest progress", record_action(pool, user_id, ACTION_SUBMIT_QUIZ)).await;
    if streak.transition.is_write() {
        non_fatal("quest progress", record_action(pool, user_id, ACTION_STREAK_HIT)).await;
    }

    Ok(QuizOutcome {
        xp_earned,
        is_level_up: grant.leveled_up,
        new_level: grant.new_level,
        new_total_xp: grant.total_xp,
        item_progress,
        dictionary_progress,
        streak,
        achievements_unlocked,
    })
}
