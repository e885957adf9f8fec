//! Repositories for database operations

pub mod budget;
pub mod content;
pub mod goal;
pub mod progress;
pub mod user;

pub use budget::BudgetRepository;
pub use content::{ChallengeRepository, LessonRepository};
pub use goal::GoalRepository;
pub use progress::ProgressRepository;
pub use user::UserRepository;

/// Helpers for tests that run against a live database
#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::PgPool;
    use uuid::Uuid;

    /// Connect to `DATABASE_URL` and bring the schema up to date
    pub async fn pool() -> PgPool {
        let config = common::database::DatabaseConfig::from_env().unwrap();
        let pool = common::database::init_pool(&config).await.unwrap();
        common::database::run_migrations(&pool).await.unwrap();
        pool
    }

    /// Insert a throwaway user and return its id
    pub async fn user(pool: &PgPool, name: &str) -> Uuid {
        sqlx::query_scalar(
            r#"
            INSERT INTO users (name, email, hashed_password)
            VALUES ($1, $2, 'not-a-hash')
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(format!("{}@example.com", Uuid::new_v4()))
        .fetch_one(pool)
        .await
        .unwrap()
    }
}
