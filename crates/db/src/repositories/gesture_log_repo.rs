//! Repository for `gesture_logs`.

use sqlx::PgPool;

use crate::models::learning::{CreateGestureLog, GestureLog};

const COLUMNS: &str = "id, user_id, dictionary_item_id, detected_label, expected_label, \
                       accuracy_score, device_info, created_at";

pub struct GestureLogRepo;

impl GestureLogRepo {
    pub async fn create(pool: &PgPool, input: &CreateGestureLog) -> Result<GestureLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO gesture_logs
                (user_id, dictionary_item_id, detected_label, expected_label,
                 accuracy_score, device_info)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GestureLog>(&query)
            .bind(input.user_id)
            .bind(input.dictionary_item_id)
            .bind(&input.detected_label)
            .bind(&input.expected_label)
            .bind(input.accuracy_score)
            .bind(&input.device_info)
            .fetch_one(pool)
            .await
    }
}
