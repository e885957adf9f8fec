//! Goal repository

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::goal::{Goal, NewGoalRequest, STATUS_ACTIVE};

#[derive(Clone)]
pub struct GoalRepository {
    pool: PgPool,
}

impl GoalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All of a user's goals, oldest first
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Goal>> {
        let goals = sqlx::query_as::<_, Goal>(
            r#"
            SELECT id, user_id, goal_type, target_amount, current_amount, status,
                   target_date, created_at
            FROM goals
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(goals)
    }

    /// A user's goals that are still being saved for
    pub async fn list_active(&self, user_id: Uuid) -> Result<Vec<Goal>> {
        let goals = sqlx::query_as::<_, Goal>(
            r#"
            SELECT id, user_id, goal_type, target_amount, current_amount, status,
                   target_date, created_at
            FROM goals
            WHERE user_id = $1 AND status = $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .bind(STATUS_ACTIVE)
        .fetch_all(&self.pool)
        .await?;

        Ok(goals)
    }

    /// Every goal in the system, for platform-wide KPIs
    pub async fn list_all(&self) -> Result<Vec<Goal>> {
        let goals = sqlx::query_as::<_, Goal>(
            r#"
            SELECT id, user_id, goal_type, target_amount, current_amount, status,
                   target_date, created_at
            FROM goals
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(goals)
    }

    pub async fn create(&self, user_id: Uuid, request: &NewGoalRequest) -> Result<Goal> {
        info!("Creating goal for user {}", user_id);

        let goal = sqlx::query_as::<_, Goal>(
            r#"
            INSERT INTO goals (user_id, goal_type, target_amount, current_amount, status, target_date)
            VALUES ($1, $2, $3, 0, $4, $5)
            RETURNING id, user_id, goal_type, target_amount, current_amount, status,
                      target_date, created_at
            "#,
        )
        .bind(user_id)
        .bind(request.goal_type.trim())
        .bind(request.target_amount)
        .bind(STATUS_ACTIVE)
        .bind(request.target_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(goal)
    }

    /// Delete a goal the user owns
    ///
    /// Returns `false` when no goal matched, whether it is absent or belongs
    /// to someone else.
    pub async fn delete_owned(&self, user_id: Uuid, goal_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM goals
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(goal_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Add `amount` to a goal the user owns
    ///
    /// The saved amount never exceeds the target, and reaching the target
    /// completes the goal. Returns `None` when the user owns no such goal.
    pub async fn contribute(
        &self,
        user_id: Uuid,
        goal_id: Uuid,
        amount: f64,
    ) -> Result<Option<Goal>> {
        let goal = sqlx::query_as::<_, Goal>(
            r#"
            UPDATE goals
            SET current_amount = LEAST(current_amount + $1, target_amount),
                status = CASE
                    WHEN current_amount + $1 >= target_amount THEN 'completed'
                    ELSE 'active'
                END
            WHERE id = $2 AND user_id = $3
            RETURNING id, user_id, goal_type, target_amount, current_amount, status,
                      target_date, created_at
            "#,
        )
        .bind(amount)
        .bind(goal_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(goal)
    }
}
