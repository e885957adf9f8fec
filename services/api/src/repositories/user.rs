//! User profile lookups for the api service

use std::collections::HashMap;

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whether the user has finished onboarding; unknown users have not
    pub async fn onboarding_completed(&self, user_id: Uuid) -> Result<bool> {
        let completed: Option<bool> = sqlx::query_scalar(
            r#"
            SELECT COALESCE((profile_json ->> 'onboarding_completed')::boolean, FALSE)
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(completed.unwrap_or(false))
    }

    /// Merge `onboarding_completed: true` into the profile document
    pub async fn mark_onboarding_completed(&self, user_id: Uuid) -> Result<()> {
        info!("Marking onboarding completed for user {}", user_id);

        sqlx::query(
            r#"
            UPDATE users
            SET profile_json = profile_json || '{"onboarding_completed": true}'::jsonb,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Display names for the given ids; ids with no user row are absent
    pub async fn names_for_ids(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, (Uuid, String)>(
            r#"
            SELECT id, name
            FROM users
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }
}
