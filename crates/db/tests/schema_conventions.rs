use sqlx::PgPool;

/// All `id` columns must be bigint.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_pks_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, data_type) in &rows {
        assert_eq!(data_type, "bigint", "Table {table}.id should be bigint, got {data_type}");
    }
}

/// Timestamps are always stored with a time zone.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_no_naive_timestamps(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, column_name
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND data_type = 'timestamp without time zone'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name, column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(rows.is_empty(), "Found naive timestamp columns: {rows:?}");
}

/// Every table (except _sqlx_migrations) records when a row was created.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_creation_timestamp(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        let (has_column,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1
                FROM information_schema.columns
                WHERE table_schema = 'public'
                  AND table_name = $1
                  AND column_name IN ('created_at', 'unlocked_at')
            )",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .unwrap();

        assert!(has_column, "Table {table} has no creation timestamp");
    }
}

/// No character varying columns should exist; TEXT is preferred.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_no_varchar_columns(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, column_name
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND data_type = 'character varying'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name, column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(
        rows.is_empty(),
        "Found VARCHAR columns (should use TEXT): {:?}",
        rows
    );
}

/// Unique constraints are named `uq_*` so repositories can target them
/// with `ON CONFLICT ON CONSTRAINT` and the error mapper can recognise them.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unique_constraints_are_prefixed(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, constraint_name
         FROM information_schema.table_constraints
         WHERE table_schema = 'public'
           AND constraint_type = 'UNIQUE'
         ORDER BY table_name, constraint_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, constraint) in &rows {
        assert!(
            constraint.starts_with("uq_"),
            "Unique constraint {constraint} on {table} should start with uq_"
        );
    }
}

/// Rows owned by a user go away (or are detached) when the user is deleted.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_foreign_keys_never_block_deletion(pool: PgPool) {
    let rows: Vec<(String, String, String)> = sqlx::query_as(
        "SELECT tc.table_name, rc.constraint_name, rc.delete_rule
         FROM information_schema.referential_constraints rc
         JOIN information_schema.table_constraints tc
             ON rc.constraint_name = tc.constraint_name
             AND rc.constraint_schema = tc.table_schema
         JOIN information_schema.constraint_column_usage ccu
             ON rc.unique_constraint_name = ccu.constraint_name
             AND rc.unique_constraint_schema = ccu.constraint_schema
         WHERE rc.constraint_schema = 'public'
           AND ccu.table_name = 'users'
         ORDER BY tc.table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty(), "Expected foreign keys referencing users");
    for (table, constraint, delete_rule) in &rows {
        assert!(
            delete_rule == "CASCADE" || delete_rule == "SET NULL",
            "FK {constraint} on {table} should cascade or set null, got {delete_rule}"
        );
    }
}

/// The level table ships with ten levels, 1000 XP apart.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_level_boundaries_are_seeded(pool: PgPool) {
    let rows: Vec<(i32, i64)> =
        sqlx::query_as("SELECT level, min_xp FROM level_boundaries ORDER BY level")
            .fetch_all(&pool)
            .await
            .unwrap();

    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0], (1, 0));
    assert_eq!(rows[9], (10, 9000));
}
