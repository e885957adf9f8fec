//! Integration tests for the database layer
//!
//! These tests verify that PostgreSQL is reachable and that the workspace
//! migrations produce the expected schema.

use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
use sqlx::Row;

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_migrations_create_schema() -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    assert!(health_check(&pool).await?, "Database health check failed");

    run_migrations(&pool).await?;
    // Applying twice is a no-op
    run_migrations(&pool).await?;

    for table in [
        "users",
        "budgets",
        "goals",
        "lessons",
        "challenges",
        "user_progress",
    ] {
        let row = sqlx::query("SELECT to_regclass($1) IS NOT NULL AS present")
            .bind(format!("public.{}", table))
            .fetch_one(&pool)
            .await?;
        let present: bool = row.get("present");
        assert!(present, "table {} missing after migrations", table);
    }

    Ok(())
}
