/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar date used for day-granular bookkeeping (streaks, daily quests).
pub type Date = chrono::NaiveDate;
