//! Budget repository

use anyhow::Result;
use sqlx::{PgPool, types::Json};
use uuid::Uuid;

use crate::models::budget::{Budget, ExpenseMap};

#[derive(Clone)]
pub struct BudgetRepository {
    pool: PgPool,
}

impl BudgetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The user's current budget, if one was ever saved
    pub async fn latest_for_user(&self, user_id: Uuid) -> Result<Option<Budget>> {
        let budget = sqlx::query_as::<_, Budget>(
            r#"
            SELECT id, user_id, income, expenses_json, "timestamp"
            FROM budgets
            WHERE user_id = $1
            ORDER BY "timestamp" DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(budget)
    }

    /// Create or replace the user's budget in a single statement
    pub async fn upsert(
        &self,
        user_id: Uuid,
        income: f64,
        expenses: &ExpenseMap,
    ) -> Result<Budget> {
        let budget = sqlx::query_as::<_, Budget>(
            r#"
            INSERT INTO budgets (user_id, income, expenses_json)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE
            SET income = EXCLUDED.income,
                expenses_json = EXCLUDED.expenses_json,
                "timestamp" = NOW()
            RETURNING id, user_id, income, expenses_json, "timestamp"
            "#,
        )
        .bind(user_id)
        .bind(income)
        .bind(Json(expenses))
        .fetch_one(&self.pool)
        .await?;

        Ok(budget)
    }
}
