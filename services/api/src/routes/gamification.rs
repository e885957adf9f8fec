//! Leaderboard, badges and rewards

use axum::{Extension, Json, Router, extract::State, response::IntoResponse, routing::get};
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    metrics,
    middleware::AuthUser,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/leaderboard", get(leaderboard))
        .route("/badges", get(badges))
        .route("/rewards", get(rewards))
}

async fn leaderboard(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let records = state
        .progress_repository
        .points_records()
        .await
        .map_err(|e| ApiError::internal("Failed to load points", e))?;

    let mut user_ids: Vec<Uuid> = records.iter().map(|record| record.user_id).collect();
    user_ids.sort_unstable();
    user_ids.dedup();

    let names = state
        .user_repository
        .names_for_ids(&user_ids)
        .await
        .map_err(|e| ApiError::internal("Failed to load user names", e))?;

    let leaderboard = metrics::build_leaderboard(&records, &names);

    Ok(Json(json!({ "leaderboard": leaderboard })))
}

async fn badges(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let counts = state
        .progress_repository
        .activity_counts(user.id)
        .await
        .map_err(|e| ApiError::internal("Failed to load activity", e))?;

    let badges = state.catalog.earned_badges(&counts);

    Ok(Json(json!({ "badges": badges })))
}

async fn rewards(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({ "rewards": state.catalog.rewards }))
}
