//! Budget and goal management for the signed-in user

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{
        budget::{Budget, BudgetRequest, validate_budget},
        goal::{ContributionRequest, Goal, NewGoalRequest},
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile).post(save_budget))
        .route("/budget", post(save_budget))
        .route("/goals", post(add_goal))
        .route("/goals/:id", delete(delete_goal))
        .route("/goals/:id/contribute", post(contribute_to_goal))
}

#[derive(Debug, Serialize)]
struct ProfileResponse {
    budget: Option<Budget>,
    goals: Vec<Goal>,
}

async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let (budget, goals) = tokio::try_join!(
        state.budget_repository.latest_for_user(user.id),
        state.goal_repository.list_for_user(user.id),
    )
    .map_err(|e| ApiError::internal("Failed to load profile", e))?;

    Ok(Json(ProfileResponse { budget, goals }))
}

async fn save_budget(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<BudgetRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_budget(payload.income, &payload.expenses_json).map_err(ApiError::BadRequest)?;

    let budget = state
        .budget_repository
        .upsert(user.id, payload.income, &payload.expenses_json)
        .await
        .map_err(|e| ApiError::internal("Failed to save budget", e))?;

    Ok(Json(budget))
}

async fn add_goal(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<NewGoalRequest>,
) -> ApiResult<impl IntoResponse> {
    payload.validate().map_err(ApiError::BadRequest)?;

    let goal = state
        .goal_repository
        .create(user.id, &payload)
        .await
        .map_err(|e| ApiError::internal("Failed to create goal", e))?;

    Ok((StatusCode::CREATED, Json(goal)))
}

async fn delete_goal(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let deleted = state
        .goal_repository
        .delete_owned(user.id, id)
        .await
        .map_err(|e| ApiError::internal("Failed to delete goal", e))?;

    if deleted {
        Ok(Json(json!({"msg": "Goal removed"})))
    } else {
        Err(ApiError::NotFound("Goal not found".to_string()))
    }
}

async fn contribute_to_goal(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ContributionRequest>,
) -> ApiResult<impl IntoResponse> {
    payload.validate().map_err(ApiError::BadRequest)?;

    let goal = state
        .goal_repository
        .contribute(user.id, id, payload.amount)
        .await
        .map_err(|e| ApiError::internal("Failed to update goal", e))?
        .ok_or_else(|| ApiError::NotFound("Goal not found".to_string()))?;

    Ok(Json(goal))
}
