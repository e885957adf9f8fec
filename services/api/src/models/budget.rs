//! Budget models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Expense category to monthly amount
pub type ExpenseMap = BTreeMap<String, f64>;

/// A user's current budget row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Budget {
    pub id: Uuid,
    pub user_id: Uuid,
    pub income: f64,
    #[sqlx(json)]
    pub expenses_json: ExpenseMap,
    pub timestamp: DateTime<Utc>,
}

/// Income and expenses without row metadata
///
/// The zero value stands in for users who have not saved a budget yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub income: f64,
    pub expenses_json: ExpenseMap,
}

impl BudgetSummary {
    pub fn total_expenses(&self) -> f64 {
        self.expenses_json.values().sum()
    }

    pub fn monthly_savings(&self) -> f64 {
        self.income - self.total_expenses()
    }
}

impl From<Budget> for BudgetSummary {
    fn from(budget: Budget) -> Self {
        Self {
            income: budget.income,
            expenses_json: budget.expenses_json,
        }
    }
}

/// Request to create or replace the current budget
#[derive(Debug, Clone, Deserialize)]
pub struct BudgetRequest {
    pub income: f64,
    #[serde(default)]
    pub expenses_json: ExpenseMap,
}

/// Reject negative or non-finite amounts
pub fn validate_budget(income: f64, expenses: &ExpenseMap) -> Result<(), String> {
    if !income.is_finite() || income < 0.0 {
        return Err("Income must be a non-negative number".to_string());
    }

    for (category, amount) in expenses {
        if category.trim().is_empty() {
            return Err("Expense categories must have a name".to_string());
        }
        if !amount.is_finite() || *amount < 0.0 {
            return Err(format!(
                "Expense '{}' must be a non-negative number",
                category
            ));
        }
    }

    Ok(())
}
