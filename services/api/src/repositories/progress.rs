//! Progress repository: the append-only lesson and challenge log

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::progress::{
    ActivityCounts, PointsRecord, ProgressStatus, ProgressTarget, RecentLesson,
};

#[derive(Clone)]
pub struct ProgressRepository {
    pool: PgPool,
}

impl ProgressRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a progress row and return the points it was credited with
    ///
    /// Only the user's first completed row for a lesson or challenge keeps
    /// `points_earned`; later completions are stored with 0.
    pub async fn record(
        &self,
        user_id: Uuid,
        target: ProgressTarget,
        status: ProgressStatus,
        points_earned: i32,
    ) -> Result<i32> {
        let (lesson_id, challenge_id) = match target {
            ProgressTarget::Lesson(id) => (Some(id), None),
            ProgressTarget::Challenge(id) => (None, Some(id)),
        };
        info!(
            "Recording {} progress for user {} ({:?})",
            status.as_str(),
            user_id,
            target
        );

        let awarded: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO user_progress (user_id, lesson_id, challenge_id, status, points_earned)
            SELECT $1::uuid, $2::uuid, $3::uuid, $4::text,
                CASE
                    WHEN $4::text = 'completed' AND NOT EXISTS (
                        SELECT 1 FROM user_progress
                        WHERE user_id = $1::uuid
                          AND status = 'completed'
                          AND (lesson_id = $2::uuid OR challenge_id = $3::uuid)
                    ) THEN $5::integer
                    ELSE 0
                END
            RETURNING points_earned
            "#,
        )
        .bind(user_id)
        .bind(lesson_id)
        .bind(challenge_id)
        .bind(status.as_str())
        .bind(points_earned)
        .fetch_one(&self.pool)
        .await?;

        Ok(awarded)
    }

    /// Most recently completed lessons, newest first
    pub async fn recent_completed_lessons(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<RecentLesson>> {
        let lessons = sqlx::query_as::<_, RecentLesson>(
            r#"
            SELECT p.lesson_id, l.title, l.topic, p.completed_at
            FROM user_progress p
            JOIN lessons l ON l.id = p.lesson_id
            WHERE p.user_id = $1 AND p.status = 'completed'
            ORDER BY p.completed_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(lessons)
    }

    /// Every progress row's points, in the order they were recorded
    pub async fn points_records(&self) -> Result<Vec<PointsRecord>> {
        let records = sqlx::query_as::<_, PointsRecord>(
            r#"
            SELECT user_id, points_earned
            FROM user_progress
            ORDER BY completed_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Inputs for badge evaluation
    ///
    /// Repeat completions of the same lesson or challenge count once.
    pub async fn activity_counts(&self, user_id: Uuid) -> Result<ActivityCounts> {
        let (has_budget, has_goal, completed_lessons, completed_challenges) =
            sqlx::query_as::<_, (bool, bool, i64, i64)>(
                r#"
                SELECT
                    EXISTS (SELECT 1 FROM budgets WHERE user_id = $1),
                    EXISTS (SELECT 1 FROM goals WHERE user_id = $1),
                    (SELECT COUNT(DISTINCT lesson_id) FROM user_progress
                     WHERE user_id = $1 AND lesson_id IS NOT NULL AND status = 'completed'),
                    (SELECT COUNT(DISTINCT challenge_id) FROM user_progress
                     WHERE user_id = $1 AND challenge_id IS NOT NULL AND status = 'completed')
                "#,
            )
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(ActivityCounts {
            has_budget,
            has_goal,
            completed_lessons,
            completed_challenges,
        })
    }

    /// Completed lesson rows across all users
    pub async fn completed_lesson_count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM user_progress
            WHERE lesson_id IS NOT NULL AND status = 'completed'
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Distinct users with any progress in the last seven days
    pub async fn weekly_active_users(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(DISTINCT user_id)
            FROM user_progress
            WHERE completed_at >= NOW() - INTERVAL '7 days'
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{LessonRepository, test_support};

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_progress_feeds_counts_and_recent_lessons() {
        let pool = test_support::pool().await;
        let user_id = test_support::user(&pool, "Learner").await;
        let repo = ProgressRepository::new(pool.clone());
        let lessons = LessonRepository::new(pool).list().await.unwrap();

        for lesson in lessons.iter().take(5) {
            repo.record(
                user_id,
                ProgressTarget::Lesson(lesson.id),
                ProgressStatus::Completed,
                50,
            )
            .await
            .unwrap();
        }
        repo.record(
            user_id,
            ProgressTarget::Lesson(lessons[0].id),
            ProgressStatus::InProgress,
            0,
        )
        .await
        .unwrap();

        let counts = repo.activity_counts(user_id).await.unwrap();
        assert_eq!(counts.completed_lessons, 5);
        assert_eq!(counts.completed_challenges, 0);
        assert!(!counts.has_budget);

        let recent = repo.recent_completed_lessons(user_id, 3).await.unwrap();
        assert_eq!(recent.len(), 3);

        let mine: i64 = repo
            .points_records()
            .await
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| i64::from(r.points_earned))
            .sum();
        assert_eq!(mine, 250);
        assert!(repo.weekly_active_users().await.unwrap() >= 1);
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_repeat_completion_earns_nothing() {
        let pool = test_support::pool().await;
        let user_id = test_support::user(&pool, "Repeater").await;
        let repo = ProgressRepository::new(pool.clone());
        let lessons = LessonRepository::new(pool).list().await.unwrap();
        let target = ProgressTarget::Lesson(lessons[0].id);

        let first = repo
            .record(user_id, target, ProgressStatus::Completed, 50)
            .await
            .unwrap();
        let second = repo
            .record(user_id, target, ProgressStatus::Completed, 50)
            .await
            .unwrap();
        assert_eq!(first, 50);
        assert_eq!(second, 0);

        for _ in 0..3 {
            repo.record(user_id, target, ProgressStatus::Completed, 50)
                .await
                .unwrap();
        }

        // Five rows for one lesson are still a single completed lesson
        let counts = repo.activity_counts(user_id).await.unwrap();
        assert_eq!(counts.completed_lessons, 1);

        let mine: i64 = repo
            .points_records()
            .await
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| i64::from(r.points_earned))
            .sum();
        assert_eq!(mine, 50);
    }
}
