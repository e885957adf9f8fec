//! Platform KPIs

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use serde_json::json;

use crate::{
    error::{ApiError, ApiResult},
    metrics,
    models::{
        dashboard::{GoalHealth, Kpis, LearningProgress, UserEngagement},
        goal::STATUS_COMPLETED,
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/kpis", get(kpis))
}

async fn kpis(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let (weekly_active_users, completed_lessons, total_lessons, goals) = tokio::try_join!(
        state.progress_repository.weekly_active_users(),
        state.progress_repository.completed_lesson_count(),
        state.lesson_repository.count(),
        state.goal_repository.list_all(),
    )
    .map_err(|e| ApiError::internal("Failed to compute KPIs", e))?;

    let goals_achieved = goals
        .iter()
        .filter(|goal| goal.status == STATUS_COMPLETED)
        .count() as i64;

    let kpis = Kpis {
        user_engagement: UserEngagement {
            weekly_active_users,
        },
        learning_progress: LearningProgress {
            lesson_completion_rate: metrics::format_percent(metrics::completion_rate(
                completed_lessons,
                total_lessons,
            )),
        },
        financial_health: GoalHealth {
            goals_achieved,
            average_goal_progress: metrics::format_percent(metrics::average_goal_progress(&goals)),
        },
    };

    Ok(Json(json!({ "kpis": kpis })))
}
