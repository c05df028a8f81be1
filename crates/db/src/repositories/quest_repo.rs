//! Repository for `daily_quests` and `user_quests`.

use lisan_core::types::{Date, DbId};
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::quest::{CreateDailyQuest, DailyQuest, UserQuestDetail};

const COLUMNS: &str = "id, title, description, action_type, target_count, xp_reward, \
                       is_active, created_at, updated_at";

const DETAIL_SELECT: &str = "SELECT uq.id, uq.user_id, uq.quest_id, uq.assigned_date,
                    uq.progress_count, uq.is_completed, uq.is_claimed,
                    q.title, q.description, q.action_type, q.target_count, q.xp_reward
             FROM user_quests uq
             JOIN daily_quests q ON q.id = uq.quest_id";

pub struct QuestRepo;

impl QuestRepo {
    pub async fn create(pool: &PgPool, input: &CreateDailyQuest) -> Result<DailyQuest, sqlx::Error> {
        let query = format!(
            "INSERT INTO daily_quests (title, description, action_type, target_count, xp_reward)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DailyQuest>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.action_type)
            .bind(input.target_count)
            .bind(input.xp_reward)
            .fetch_one(pool)
            .await
    }

    /// Give the user today's copy of every active quest. Existing
    /// assignments are left alone.
    pub async fn assign_active<'e, E>(executor: E, user_id: DbId, date: Date) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "INSERT INTO user_quests (user_id, quest_id, assigned_date)
             SELECT $1, id, $2 FROM daily_quests WHERE is_active
             ON CONFLICT ON CONSTRAINT uq_user_quests_user_quest_date DO NOTHING",
        )
        .bind(user_id)
        .bind(date)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        date: Date,
    ) -> Result<Vec<UserQuestDetail>, sqlx::Error> {
        let query = format!(
            "{DETAIL_SELECT}
             WHERE uq.user_id = $1 AND uq.assigned_date = $2
             ORDER BY uq.id ASC"
        );
        sqlx::query_as::<_, UserQuestDetail>(&query)
            .bind(user_id)
            .bind(date)
            .fetch_all(pool)
            .await
    }

    /// Today's unfinished quests for an action, locked for update.
    pub async fn lock_open_for_action(
        conn: &mut PgConnection,
        user_id: DbId,
        date: Date,
        action_type: &str,
    ) -> Result<Vec<UserQuestDetail>, sqlx::Error> {
        let query = format!(
            "{DETAIL_SELECT}
             WHERE uq.user_id = $1 AND uq.assigned_date = $2
               AND q.action_type = $3 AND NOT uq.is_completed
             ORDER BY uq.id ASC
             FOR UPDATE OF uq"
        );
        sqlx::query_as::<_, UserQuestDetail>(&query)
            .bind(user_id)
            .bind(date)
            .bind(action_type)
            .fetch_all(&mut *conn)
            .await
    }

    /// Lock one of the user's quest assignments.
    pub async fn lock_for_user(
        conn: &mut PgConnection,
        user_quest_id: DbId,
        user_id: DbId,
    ) -> Result<Option<UserQuestDetail>, sqlx::Error> {
        let query = format!(
            "{DETAIL_SELECT}
             WHERE uq.id = $1 AND uq.user_id = $2
             FOR UPDATE OF uq"
        );
        sqlx::query_as::<_, UserQuestDetail>(&query)
            .bind(user_quest_id)
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await
    }

    pub async fn set_progress<'e, E>(
        executor: E,
        user_quest_id: DbId,
        progress_count: i32,
        is_completed: bool,
    ) -> Result<(), sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query("UPDATE user_quests SET progress_count = $2, is_completed = $3 WHERE id = $1")
            .bind(user_quest_id)
            .bind(progress_count)
            .bind(is_completed)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn mark_claimed<'e, E>(executor: E, user_quest_id: DbId) -> Result<(), sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query("UPDATE user_quests SET is_claimed = true WHERE id = $1")
            .bind(user_quest_id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
