//! Derived metrics computed from stored rows
//!
//! Everything here is pure so handlers stay thin and the arithmetic is
//! testable without a database.

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{
    budget::BudgetSummary,
    dashboard::FinancialHealth,
    gamification::LeaderboardEntry,
    goal::Goal,
    progress::PointsRecord,
};

/// `completed / total * 100`, or 0 when there is nothing to complete
pub fn completion_rate(completed: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    completed as f64 / total as f64 * 100.0
}

/// Render a percentage with two decimals, e.g. `"42.50%"`
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Mean of `current / target` across goals, as a percentage
///
/// Goals with a non-positive target carry no meaningful progress and are
/// skipped.
pub fn average_goal_progress(goals: &[Goal]) -> f64 {
    let ratios: Vec<f64> = goals
        .iter()
        .filter(|goal| goal.target_amount > 0.0)
        .map(|goal| goal.current_amount / goal.target_amount)
        .collect();

    if ratios.is_empty() {
        return 0.0;
    }
    ratios.iter().sum::<f64>() / ratios.len() as f64 * 100.0
}

/// Savings rate and score tier for a budget
pub fn financial_health(budget: &BudgetSummary) -> FinancialHealth {
    let savings_rate = if budget.income > 0.0 {
        budget.monthly_savings() / budget.income * 100.0
    } else {
        0.0
    };

    let score = if savings_rate >= 20.0 {
        85
    } else if savings_rate >= 10.0 {
        60
    } else {
        30
    };

    FinancialHealth {
        savings_rate,
        score,
    }
}

/// Sum points per user and rank them
///
/// Users are grouped in order of first appearance and then sorted
/// descending with a stable sort, so equal totals keep that order. Ids with
/// no entry in `names` are dropped.
pub fn build_leaderboard(
    records: &[PointsRecord],
    names: &HashMap<Uuid, String>,
) -> Vec<LeaderboardEntry> {
    let mut order: Vec<Uuid> = Vec::new();
    let mut totals: HashMap<Uuid, i64> = HashMap::new();

    for record in records {
        let total = totals.entry(record.user_id).or_insert_with(|| {
            order.push(record.user_id);
            0
        });
        *total += i64::from(record.points_earned);
    }

    let mut entries: Vec<LeaderboardEntry> = order
        .into_iter()
        .filter_map(|user_id| {
            let username = names.get(&user_id)?.clone();
            Some(LeaderboardEntry {
                user_id,
                username,
                total_points: totals.get(&user_id).copied().unwrap_or_default(),
            })
        })
        .collect();

    entries.sort_by(|a, b| b.total_points.cmp(&a.total_points));
    entries
}
