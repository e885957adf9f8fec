//! Lesson and challenge repositories

use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::content::{Challenge, Lesson, LessonSummary};

#[derive(Clone)]
pub struct LessonRepository {
    pool: PgPool,
}

impl LessonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Catalogue listing, ordered by title
    pub async fn list(&self) -> Result<Vec<LessonSummary>> {
        let lessons = sqlx::query_as::<_, LessonSummary>(
            r#"
            SELECT id, title, topic, difficulty, estimated_duration
            FROM lessons
            ORDER BY title ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(lessons)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Lesson>> {
        let lesson = sqlx::query_as::<_, Lesson>(
            r#"
            SELECT id, title, topic, difficulty, estimated_duration, content_json, created_at
            FROM lessons
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(lesson)
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lessons")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[derive(Clone)]
pub struct ChallengeRepository {
    pool: PgPool,
}

impl ChallengeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Challenge>> {
        let challenges = sqlx::query_as::<_, Challenge>(
            r#"
            SELECT id, title, description, difficulty, content_json, created_at
            FROM challenges
            ORDER BY title ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(challenges)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Challenge>> {
        let challenge = sqlx::query_as::<_, Challenge>(
            r#"
            SELECT id, title, description, difficulty, content_json, created_at
            FROM challenges
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(challenge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support;

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_seeded_content_is_listed() {
        let pool = test_support::pool().await;
        let lessons = LessonRepository::new(pool.clone());
        let challenges = ChallengeRepository::new(pool);

        let listed = lessons.list().await.unwrap();
        assert!(listed.len() >= 6);
        assert!(listed.windows(2).all(|w| w[0].title <= w[1].title));
        assert_eq!(lessons.count().await.unwrap(), listed.len() as i64);

        let first = lessons.find(listed[0].id).await.unwrap().unwrap();
        assert_eq!(first.title, listed[0].title);
        assert!(lessons.find(Uuid::new_v4()).await.unwrap().is_none());

        assert!(challenges.list().await.unwrap().len() >= 4);
        assert!(challenges.find(Uuid::new_v4()).await.unwrap().is_none());
    }
}
