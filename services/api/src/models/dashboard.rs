//! Dashboard and analytics payloads

use serde::Serialize;

use super::{budget::BudgetSummary, goal::Goal, progress::RecentLesson};

/// Savings rate and the score tier derived from it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinancialHealth {
    /// Percentage of income left after expenses
    pub savings_rate: f64,
    pub score: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub budget: BudgetSummary,
    pub goals: Vec<Goal>,
    pub recent_lessons: Vec<RecentLesson>,
    pub financial_health: FinancialHealth,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserEngagement {
    pub weekly_active_users: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LearningProgress {
    pub lesson_completion_rate: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalHealth {
    pub goals_achieved: i64,
    pub average_goal_progress: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Kpis {
    pub user_engagement: UserEngagement,
    pub learning_progress: LearningProgress,
    pub financial_health: GoalHealth,
}
