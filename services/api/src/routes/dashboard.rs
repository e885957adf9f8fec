//! Dashboard summary

use axum::{Extension, Json, Router, extract::State, response::IntoResponse, routing::get};

use crate::{
    error::{ApiError, ApiResult},
    metrics,
    middleware::AuthUser,
    models::{budget::BudgetSummary, dashboard::DashboardResponse},
    state::AppState,
};

const RECENT_LESSON_LIMIT: i64 = 5;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_dashboard))
}

async fn get_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let (budget, goals, recent_lessons) = tokio::try_join!(
        state.budget_repository.latest_for_user(user.id),
        state.goal_repository.list_active(user.id),
        state
            .progress_repository
            .recent_completed_lessons(user.id, RECENT_LESSON_LIMIT),
    )
    .map_err(|e| ApiError::internal("Failed to load dashboard", e))?;

    let budget = budget.map(BudgetSummary::from).unwrap_or_default();
    let financial_health = metrics::financial_health(&budget);

    Ok(Json(DashboardResponse {
        budget,
        goals,
        recent_lessons,
        financial_health,
    }))
}
