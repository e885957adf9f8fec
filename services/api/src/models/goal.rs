//! Savings goal models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_COMPLETED: &str = "completed";

/// Savings goal entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Goal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub goal_type: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub status: String,
    pub target_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Request to add a goal
#[derive(Debug, Clone, Deserialize)]
pub struct NewGoalRequest {
    #[serde(default)]
    pub goal_type: String,
    #[serde(default)]
    pub target_amount: f64,
    pub target_date: Option<NaiveDate>,
}

impl NewGoalRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.goal_type.trim().is_empty() {
            return Err("Goal type is required".to_string());
        }
        if !self.target_amount.is_finite() || self.target_amount <= 0.0 {
            return Err("Target amount must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Request to put money towards a goal
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionRequest {
    pub amount: f64,
}

impl ContributionRequest {
    pub fn validate(&self) -> Result<(), String> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err("Contribution must be greater than zero".to_string());
        }
        Ok(())
    }
}
